//! Error types for the master farm program.

use anchor_lang::prelude::*;

#[error_code]
pub enum FarmError {
    /// [6000] Pool id does not reference an existing pool.
    #[msg("Pool does not exist")]
    InvalidPool,

    /// [6001] The farm already carries the maximum number of pools.
    #[msg("Pool limit reached")]
    TooManyPools,

    /// [6002] A pool must carry a non-zero allocation to be added.
    #[msg("Allocation points must be greater than zero")]
    ZeroAllocation,

    /// [6003] Withdraw amount exceeds the staked principal.
    #[msg("Insufficient staked balance for this operation")]
    InsufficientStakedBalance,

    /// [6004] Withdrawal fee above the 200 bps bound.
    #[msg("Withdrawal fee is too large")]
    FeeTooLarge,

    /// [6005] Withdrawal fee window above the 72 hour bound.
    #[msg("Withdrawal fee time period is too large")]
    FeeWindowTooLarge,

    /// [6006] Pool 0 is the staking pool; use enter_staking / leave_staking.
    #[msg("Pool 0 is reserved for staking - use enter_staking/leave_staking")]
    UseStakingEntrypoints,

    /// [6007] Caller is not the registered dev address.
    #[msg("dev: wut?")]
    NotDev,

    /// [6008] Caller is not the farm authority.
    #[msg("Unauthorized: caller is not the farm authority")]
    Unauthorized,

    /// [6009] Arithmetic overflow during reward accounting.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6010] The provided token account does not match the pool's vault.
    #[msg("Vault address mismatch")]
    VaultMismatch,

    /// [6011] The provided mint does not match the expected mint.
    #[msg("Token mint mismatch")]
    MintMismatch,

    /// [6012] The treasury token account is not owned by the treasury address.
    #[msg("Treasury token account owner mismatch")]
    TreasuryMismatch,
}
