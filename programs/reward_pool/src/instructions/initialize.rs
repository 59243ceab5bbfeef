//! Initialize instruction handler.
//!
//! Creates the pool together with its staked-asset and reward vaults. The
//! reward vault starts empty; fund it with `fund_rewards` before the window
//! opens or early harvests will be short-paid.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::PoolError;
use crate::state::RewardPool;

/// Accounts required for pool initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The authority that will own the pool.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The pool account, one per (staked mint, reward mint) pair.
    #[account(
        init,
        payer = authority,
        space = RewardPool::LEN,
        seeds = [REWARD_POOL_SEED, staked_mint.key().as_ref(), reward_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, RewardPool>,

    pub staked_mint: Account<'info, Mint>,
    pub reward_mint: Account<'info, Mint>,

    /// Vault holding staked principal.
    #[account(
        init,
        payer = authority,
        seeds = [STAKED_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = staked_mint,
        token::authority = pool
    )]
    pub staked_vault: Account<'info, TokenAccount>,

    /// Vault the whole emission is paid from.
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(
    ctx: Context<Initialize>,
    admin: Pubkey,
    reward_per_block: u64,
    start_block: u64,
    end_block: u64,
    limit_amount: u64,
) -> Result<()> {
    require!(end_block > start_block, PoolError::InvalidWindow);

    let pool = &mut ctx.accounts.pool;
    pool.authority = ctx.accounts.authority.key();
    pool.admin = admin;
    pool.staked_mint = ctx.accounts.staked_mint.key();
    pool.reward_mint = ctx.accounts.reward_mint.key();
    pool.staked_vault = ctx.accounts.staked_vault.key();
    pool.reward_vault = ctx.accounts.reward_vault.key();
    pool.reward_per_block = reward_per_block;
    pool.start_block = start_block;
    pool.end_block = end_block;
    pool.last_reward_block = start_block;
    pool.acc_reward_per_share = 0;
    pool.total_staked = 0;
    pool.limit_amount = limit_amount;
    pool.depositor_count = 0;
    pool.bump = ctx.bumps.pool;

    msg!(
        "Reward pool initialized: {} per block, blocks [{}, {}]",
        reward_per_block,
        start_block,
        end_block
    );
    if limit_amount > 0 {
        msg!("Per-position deposit cap: {}", limit_amount);
    }

    Ok(())
}
