//! Deposit instruction handler.
//!
//! Settle-then-mutate: the accumulator is brought to the current slot and any
//! pending reward is paid out before the new principal changes the share
//! price. A zero-amount deposit is a pure harvest and stays open to
//! blacklisted and capped positions.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::PoolError;
use crate::instructions::payout::safe_reward_transfer;
use crate::state::{Position, RewardPool};

/// Accounts required for staking into the pool.
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// The depositor.
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_POOL_SEED, pool.staked_mint.as_ref(), pool.reward_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, RewardPool>,

    /// Depositor's position (created on first deposit).
    #[account(
        init_if_needed,
        payer = user,
        space = Position::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(mut, address = pool.staked_vault @ PoolError::MintMismatch)]
    pub staked_vault: Account<'info, TokenAccount>,

    #[account(mut, address = pool.reward_vault @ PoolError::MintMismatch)]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Depositor's token account for the staked asset.
    #[account(
        mut,
        constraint = user_staked_account.owner == user.key(),
        constraint = user_staked_account.mint == pool.staked_mint @ PoolError::MintMismatch
    )]
    pub user_staked_account: Account<'info, TokenAccount>,

    /// Depositor's reward token account, destination of the harvest.
    #[account(
        mut,
        constraint = user_reward_account.owner == user.key(),
        constraint = user_reward_account.mint == pool.reward_mint @ PoolError::MintMismatch
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    if amount > 0 {
        require!(!ctx.accounts.position.blacklisted, PoolError::Blacklisted);
        let limit = ctx.accounts.pool.limit_amount;
        if limit > 0 {
            let new_amount = ctx
                .accounts
                .position
                .amount
                .checked_add(amount)
                .ok_or(PoolError::MathOverflow)?;
            require!(new_amount <= limit, PoolError::LimitExceeded);
        }
    }

    let clock = Clock::get()?;
    ctx.accounts.pool.settle(clock.slot)?;

    // fresh positions deserialize as all-zero; stamp identity once
    if ctx.accounts.position.owner == Pubkey::default() {
        let position = &mut ctx.accounts.position;
        position.pool = ctx.accounts.pool.key();
        position.owner = ctx.accounts.user.key();
        position.bump = ctx.bumps.position;
        ctx.accounts.pool.depositor_count = ctx
            .accounts
            .pool
            .depositor_count
            .checked_add(1)
            .ok_or(PoolError::MathOverflow)?;
    }

    let pending = ctx
        .accounts
        .position
        .pending_at(ctx.accounts.pool.acc_reward_per_share)?;
    if pending > 0 {
        safe_reward_transfer(
            &ctx.accounts.pool,
            &ctx.accounts.reward_vault,
            &ctx.accounts.user_reward_account,
            &ctx.accounts.token_program,
            pending,
        )?;
    }

    if amount > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.user_staked_account.to_account_info(),
                    to: ctx.accounts.staked_vault.to_account_info(),
                    authority: ctx.accounts.user.to_account_info(),
                },
            ),
            amount,
        )?;

        let position = &mut ctx.accounts.position;
        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;

        let pool = &mut ctx.accounts.pool;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
    }

    let acc = ctx.accounts.pool.acc_reward_per_share;
    ctx.accounts.position.checkpoint(acc)?;

    msg!(
        "Deposit: +{} (staked {}), harvested {}",
        amount,
        ctx.accounts.position.amount,
        pending
    );

    Ok(())
}
