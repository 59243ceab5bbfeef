//! Deposit instruction handler.
//!
//! Settle-then-mutate: the pool accumulator is brought to the current slot and
//! any pending reward is paid out before the new principal changes the share
//! price. A zero-amount deposit is therefore a pure harvest.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FarmError;
use crate::instructions::emission::{mint_emission, safe_reward_transfer};
use crate::state::{Farm, Position};

/// Accounts required for depositing into a weighted pool.
#[derive(Accounts)]
#[instruction(pool_id: u8)]
pub struct Deposit<'info> {
    /// The depositor. Usually also the rent payer, but a program depositing
    /// through CPI signs with a data-carrying PDA that the system program
    /// cannot debit, so rent comes from a separate payer.
    pub user: Signer<'info>,

    /// Pays rent for a first-time position.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// Depositor's position in this pool (created on first deposit).
    #[account(
        init_if_needed,
        payer = payer,
        space = Position::LEN,
        seeds = [POSITION_SEED, farm.key().as_ref(), &[pool_id], user.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(mut, address = farm.reward_mint @ FarmError::MintMismatch)]
    pub reward_mint: Account<'info, Mint>,

    /// The pool's principal vault.
    #[account(
        mut,
        constraint = farm.pools.get(pool_id as usize)
            .map(|p| p.asset_vault == asset_vault.key())
            .unwrap_or(false) @ FarmError::VaultMismatch
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    /// Depositor's token account for the pool asset.
    #[account(
        mut,
        constraint = user_asset_account.owner == user.key(),
        constraint = user_asset_account.mint == asset_vault.mint @ FarmError::MintMismatch
    )]
    pub user_asset_account: Account<'info, TokenAccount>,

    #[account(mut, address = farm.reward_vault @ FarmError::VaultMismatch)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut, address = farm.dev_vault @ FarmError::VaultMismatch)]
    pub dev_vault: Account<'info, TokenAccount>,

    /// Depositor's reward token account, destination of the harvest.
    #[account(
        mut,
        constraint = user_reward_account.owner == user.key(),
        constraint = user_reward_account.mint == farm.reward_mint @ FarmError::MintMismatch
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<Deposit>, pool_id: u8, amount: u64) -> Result<()> {
    require!(pool_id != STAKING_POOL_ID, FarmError::UseStakingEntrypoints);
    ctx.accounts.farm.pool(pool_id)?;

    let clock = Clock::get()?;

    let minted = ctx.accounts.farm.settle_pool(pool_id, clock.slot)?;
    mint_emission(
        &ctx.accounts.farm,
        &ctx.accounts.reward_mint,
        &ctx.accounts.reward_vault,
        &ctx.accounts.dev_vault,
        &ctx.accounts.token_program,
        minted,
    )?;

    // fresh positions deserialize as all-zero; stamp identity once
    if ctx.accounts.position.owner == Pubkey::default() {
        let position = &mut ctx.accounts.position;
        position.farm = ctx.accounts.farm.key();
        position.owner = ctx.accounts.user.key();
        position.pool_id = pool_id;
        position.bump = ctx.bumps.position;
    }

    let pending = ctx
        .accounts
        .farm
        .pool(pool_id)?
        .pending(&ctx.accounts.position)?;
    if pending > 0 {
        safe_reward_transfer(
            &ctx.accounts.farm,
            &mut ctx.accounts.reward_vault,
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
                    from: ctx.accounts.user_asset_account.to_account_info(),
                    to: ctx.accounts.asset_vault.to_account_info(),
                    authority: ctx.accounts.user.to_account_info(),
                },
            ),
            amount,
        )?;

        let position = &mut ctx.accounts.position;
        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(FarmError::MathOverflow)?;
        position.deposit_time = clock.unix_timestamp;

        let farm = &mut ctx.accounts.farm;
        let pool = farm.pool_mut(pool_id)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(FarmError::MathOverflow)?;
    }

    let acc = ctx.accounts.farm.pool(pool_id)?.acc_reward_per_share;
    ctx.accounts.position.checkpoint(acc)?;

    msg!(
        "Deposit pool {}: +{} (staked {}), harvested {}",
        pool_id,
        amount,
        ctx.accounts.position.amount,
        pending
    );

    Ok(())
}
