//! Emergency withdraw instruction handler.
//!
//! Returns the full principal without settling the accumulator. Pending
//! reward is forfeited; the staked-balance invariant is preserved even if the
//! reward vault is broken.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::PoolError;
use crate::state::{Position, RewardPool};

#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_POOL_SEED, pool.staked_mint.as_ref(), pool.reward_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, RewardPool>,

    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ PoolError::Unauthorized
    )]
    pub position: Account<'info, Position>,

    #[account(mut, address = pool.staked_vault @ PoolError::MintMismatch)]
    pub staked_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_staked_account.owner == user.key(),
        constraint = user_staked_account.mint == pool.staked_mint @ PoolError::MintMismatch
    )]
    pub user_staked_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let amount = ctx.accounts.position.amount;

    if amount > 0 {
        let staked_mint = ctx.accounts.pool.staked_mint;
        let reward_mint = ctx.accounts.pool.reward_mint;
        let seeds = &[
            REWARD_POOL_SEED,
            staked_mint.as_ref(),
            reward_mint.as_ref(),
            &[ctx.accounts.pool.bump],
        ];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.staked_vault.to_account_info(),
                    to: ctx.accounts.user_staked_account.to_account_info(),
                    authority: ctx.accounts.pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;

        let pool = &mut ctx.accounts.pool;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(PoolError::MathOverflow)?;
    }

    let position = &mut ctx.accounts.position;
    position.amount = 0;
    position.reward_debt = 0;

    msg!("Emergency withdraw: {} returned, reward forfeited", amount);
    Ok(())
}
