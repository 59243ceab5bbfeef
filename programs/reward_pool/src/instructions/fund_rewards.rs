//! Fund-rewards instruction handler.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::PoolError;
use crate::state::RewardPool;

/// Accounts required to top up the reward vault. Permissionless: anyone may
/// donate to the emission.
#[derive(Accounts)]
pub struct FundRewards<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        seeds = [REWARD_POOL_SEED, pool.staked_mint.as_ref(), pool.reward_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, RewardPool>,

    #[account(mut, address = pool.reward_vault @ PoolError::MintMismatch)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = funder_reward_account.owner == funder.key(),
        constraint = funder_reward_account.mint == pool.reward_mint @ PoolError::MintMismatch
    )]
    pub funder_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_reward_account.to_account_info(),
                to: ctx.accounts.reward_vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!("Reward vault funded with {}", amount);
    Ok(())
}
