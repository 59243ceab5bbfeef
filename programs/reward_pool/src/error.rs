//! Error types for the reward pool program.

use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    /// [6000] Caller is not the pool admin.
    #[msg("admin: wut?")]
    NotAdmin,

    /// [6001] Caller is not the pool owner.
    #[msg("Unauthorized: caller is not the pool owner")]
    Unauthorized,

    /// [6002] Deposits from this address are blocked.
    #[msg("in black list")]
    Blacklisted,

    /// [6003] Deposit would push the position above the configured cap.
    #[msg("exceed the top deposit amount")]
    LimitExceeded,

    /// [6004] Withdraw amount exceeds the staked principal.
    #[msg("not enough staked balance")]
    InsufficientStakedBalance,

    /// [6005] The accrual window is inverted.
    #[msg("end block must come after start block")]
    InvalidWindow,

    /// [6006] Arithmetic overflow during reward accounting.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6007] The provided mint does not match the expected mint.
    #[msg("Token mint mismatch")]
    MintMismatch,
}
