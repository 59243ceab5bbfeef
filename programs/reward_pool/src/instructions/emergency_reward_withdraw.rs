//! Emergency reward withdraw instruction handler.
//!
//! Owner escape hatch for a mis-funded or retired pool: drains reward tokens
//! without touching staked principal. Depositors can still exit their
//! principal through `emergency_withdraw`.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::PoolError;
use crate::state::RewardPool;

#[derive(Accounts)]
pub struct EmergencyRewardWithdraw<'info> {
    #[account(address = pool.authority @ PoolError::Unauthorized)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [REWARD_POOL_SEED, pool.staked_mint.as_ref(), pool.reward_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, RewardPool>,

    #[account(mut, address = pool.reward_vault @ PoolError::MintMismatch)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == pool.reward_mint @ PoolError::MintMismatch
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EmergencyRewardWithdraw>, amount: u64) -> Result<()> {
    require!(
        amount <= ctx.accounts.reward_vault.amount,
        PoolError::InsufficientStakedBalance
    );

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
                from: ctx.accounts.reward_vault.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    msg!("Emergency reward withdraw: {}", amount);
    Ok(())
}
