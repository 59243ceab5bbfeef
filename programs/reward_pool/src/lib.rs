//! # Reward Pool Program
//!
//! Single-asset staking pool paying a fixed per-block emission from a
//! pre-funded vault, bounded to a `[start_block, end_block]` window.
//!
//! Accrual uses the same lazy per-share accumulator as the farm controller
//! (1e12 fixed point, reward-debt checkpoints), clipped to the window so
//! nothing accrues before the start block or after the end block.
//!
//! ## Features
//! - Fixed-rate, window-bounded emission paid from a pre-funded vault
//! - Optional per-position deposit cap
//! - Admin blacklist blocking further deposits (harvest and exit stay open)
//! - Emergency exits for depositors (principal) and the owner (reward vault)

use anchor_lang::prelude::*;

declare_id!("EyKafnPME2YQWMcCVzLXspohjxUWqy1e2fiD6D1a6zNS");

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

#[program]
pub mod reward_pool {
    use super::*;

    /// Creates the pool and its vaults.
    pub fn initialize(
        ctx: Context<Initialize>,
        admin: Pubkey,
        reward_per_block: u64,
        start_block: u64,
        end_block: u64,
        limit_amount: u64,
    ) -> Result<()> {
        instructions::initialize::handler(
            ctx,
            admin,
            reward_per_block,
            start_block,
            end_block,
            limit_amount,
        )
    }

    /// Tops up the reward vault. Permissionless.
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards::handler(ctx, amount)
    }

    /// Stakes `amount`. A zero amount harvests only.
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Withdraws staked principal and harvests pending reward.
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, amount)
    }

    /// Returns principal without settlement, forfeiting pending reward.
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        instructions::emergency_withdraw::handler(ctx)
    }

    /// Drains reward tokens to the owner. Never touches staked principal.
    pub fn emergency_reward_withdraw(
        ctx: Context<EmergencyRewardWithdraw>,
        amount: u64,
    ) -> Result<()> {
        instructions::emergency_reward_withdraw::handler(ctx, amount)
    }

    /// Blocks an address from depositing. Admin only.
    pub fn set_black_list(ctx: Context<SetBlackList>) -> Result<()> {
        instructions::admin::set_black_list_handler(ctx, true)
    }

    /// Lifts a deposit block. Admin only.
    pub fn remove_black_list(ctx: Context<SetBlackList>) -> Result<()> {
        instructions::admin::set_black_list_handler(ctx, false)
    }

    /// Sets the per-position deposit cap (0 disables it). Admin only.
    pub fn set_limit_amount(ctx: Context<AdminUpdate>, limit_amount: u64) -> Result<()> {
        instructions::admin::set_limit_amount_handler(ctx, limit_amount)
    }

    /// Hands the admin role to a new address. Owner only.
    pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::set_admin_handler(ctx, new_admin)
    }
}
