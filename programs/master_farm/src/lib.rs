//! # Master Farm Program
//!
//! Multi-pool weighted farming controller for the HARV reward token.
//!
//! Each pool stakes one asset and earns a slice of the global per-block
//! emission proportional to its allocation points. Accrual uses the classic
//! per-share accumulator: settled lazily on every interaction, never
//! retroactive, with a reward-debt checkpoint per depositor. On top of every
//! pool reward a tenth is minted for the dev address.
//!
//! ## Features
//! - Weighted pools with lazy per-share accrual (1e12 fixed point)
//! - Auto-staking pool (pool 0) paying receipt tokens 1:1 for staked HARV
//! - Optional time-windowed withdrawal fee routed to the treasury
//! - Emission rescaling that settles all pools first (never retroactive)
//! - Emergency exit that returns principal and forfeits pending reward

use anchor_lang::prelude::*;

declare_id!("DBkhH2ErbaPGK3G8jEP7dQqTrYPeJXWaj9tmFrc63CdA");

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

#[program]
pub mod master_farm {
    use super::*;

    /// Creates the farm, its vaults, the receipt mint and the staking pool.
    pub fn initialize(
        ctx: Context<Initialize>,
        reward_per_block: u64,
        start_block: u64,
        dev_address: Pubkey,
        treasury_address: Pubkey,
    ) -> Result<()> {
        instructions::initialize::handler(
            ctx,
            reward_per_block,
            start_block,
            dev_address,
            treasury_address,
        )
    }

    /// Appends a weighted pool for a new asset. Settles all pools first when
    /// `with_update` is set so the weight change is never retroactive.
    pub fn add_pool(ctx: Context<AddPool>, alloc_point: u64, with_update: bool) -> Result<()> {
        instructions::add_pool::handler(ctx, alloc_point, with_update)
    }

    /// Re-weights an existing pool.
    pub fn set_pool(
        ctx: Context<SetPool>,
        pool_id: u8,
        alloc_point: u64,
        with_update: bool,
    ) -> Result<()> {
        instructions::set_pool::handler(ctx, pool_id, alloc_point, with_update)
    }

    /// Rescales the emission rate for all future accrual.
    pub fn update_multiplier(ctx: Context<UpdateMultiplier>, new_multiplier: u64) -> Result<()> {
        instructions::update_multiplier::handler(ctx, new_multiplier)
    }

    /// Configures a pool's exit fee. Bounded at 200 bps over 72 hours.
    pub fn set_withdrawal_fee(
        ctx: Context<SetWithdrawalFee>,
        pool_id: u8,
        fee_bps: u16,
        fee_window_seconds: i64,
    ) -> Result<()> {
        instructions::set_withdrawal_fee::handler(ctx, pool_id, fee_bps, fee_window_seconds)
    }

    /// Permissionless settlement checkpoint for one pool.
    pub fn update_pool(ctx: Context<UpdatePool>, pool_id: u8) -> Result<()> {
        instructions::update_pool::handler(ctx, pool_id)
    }

    /// Stakes `amount` of a pool's asset. A zero amount harvests only.
    pub fn deposit(ctx: Context<Deposit>, pool_id: u8, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, pool_id, amount)
    }

    /// Withdraws staked principal, applying the exit fee inside the window.
    pub fn withdraw(ctx: Context<Withdraw>, pool_id: u8, amount: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, pool_id, amount)
    }

    /// Stakes HARV in pool 0 for 1:1 receipt tokens.
    pub fn enter_staking(ctx: Context<EnterStaking>, amount: u64) -> Result<()> {
        instructions::staking::enter_handler(ctx, amount)
    }

    /// Burns receipt tokens and returns staked HARV from pool 0.
    pub fn leave_staking(ctx: Context<LeaveStaking>, amount: u64) -> Result<()> {
        instructions::staking::leave_handler(ctx, amount)
    }

    /// Returns principal without settlement, forfeiting pending reward.
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, pool_id: u8) -> Result<()> {
        instructions::emergency_withdraw::handler(ctx, pool_id)
    }

    /// Hands the dev role to a new address. Only the current dev may call.
    pub fn set_dev_address(ctx: Context<SetDevAddress>, new_dev: Pubkey) -> Result<()> {
        instructions::dev::set_dev_address_handler(ctx, new_dev)
    }

    /// Sweeps the accrued dev cut to the dev's token account.
    pub fn collect_dev_fees(ctx: Context<CollectDevFees>) -> Result<()> {
        instructions::dev::collect_dev_fees_handler(ctx)
    }
}
