//! Admin instruction handlers: blacklist control, deposit cap, role handoff.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::PoolError;
use crate::state::{Position, RewardPool};

/// Accounts for flipping a depositor's blacklist flag. The target position is
/// created if the address never deposited so a ban can be placed ahead of the
/// first deposit.
#[derive(Accounts)]
pub struct SetBlackList<'info> {
    #[account(mut, address = pool.admin @ PoolError::NotAdmin)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_POOL_SEED, pool.staked_mint.as_ref(), pool.reward_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, RewardPool>,

    /// CHECK: only used as a PDA seed; never read or written.
    pub target: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = admin,
        space = Position::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), target.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    pub system_program: Program<'info, System>,
}

pub fn set_black_list_handler(ctx: Context<SetBlackList>, blacklisted: bool) -> Result<()> {
    let position = &mut ctx.accounts.position;
    if position.owner == Pubkey::default() {
        position.pool = ctx.accounts.pool.key();
        position.owner = ctx.accounts.target.key();
        position.bump = ctx.bumps.position;
    }
    position.blacklisted = blacklisted;

    msg!(
        "Blacklist {} for {}",
        if blacklisted { "set" } else { "removed" },
        position.owner
    );
    Ok(())
}

/// Accounts for admin-gated pool parameter changes.
#[derive(Accounts)]
pub struct AdminUpdate<'info> {
    #[account(address = pool.admin @ PoolError::NotAdmin)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_POOL_SEED, pool.staked_mint.as_ref(), pool.reward_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, RewardPool>,
}

pub fn set_limit_amount_handler(ctx: Context<AdminUpdate>, limit_amount: u64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.limit_amount = limit_amount;
    msg!("Deposit cap set to {}", limit_amount);
    Ok(())
}

/// Accounts for handing the admin role to a new address. Owner-gated.
#[derive(Accounts)]
pub struct SetAdmin<'info> {
    #[account(address = pool.authority @ PoolError::Unauthorized)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_POOL_SEED, pool.staked_mint.as_ref(), pool.reward_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, RewardPool>,
}

pub fn set_admin_handler(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.admin = new_admin;
    msg!("Admin set to {}", new_admin);
    Ok(())
}
