//! Withdraw instruction handler.
//!
//! Same settlement contract as deposit, plus the optional exit fee: inside the
//! fee window the fee share of the principal goes to the treasury instead of
//! the depositor.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FarmError;
use crate::instructions::emission::{mint_emission, safe_reward_transfer};
use crate::state::{Farm, Position};

#[derive(Accounts)]
#[instruction(pool_id: u8)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    #[account(
        mut,
        seeds = [POSITION_SEED, farm.key().as_ref(), &[pool_id], user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ FarmError::Unauthorized
    )]
    pub position: Account<'info, Position>,

    #[account(mut, address = farm.reward_mint @ FarmError::MintMismatch)]
    pub reward_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = farm.pools.get(pool_id as usize)
            .map(|p| p.asset_vault == asset_vault.key())
            .unwrap_or(false) @ FarmError::VaultMismatch
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_asset_account.owner == user.key(),
        constraint = user_asset_account.mint == asset_vault.mint @ FarmError::MintMismatch
    )]
    pub user_asset_account: Account<'info, TokenAccount>,

    /// Treasury's token account for the pool asset; receives the exit fee.
    #[account(
        mut,
        constraint = treasury_asset_account.owner == farm.treasury_address @ FarmError::TreasuryMismatch,
        constraint = treasury_asset_account.mint == asset_vault.mint @ FarmError::MintMismatch
    )]
    pub treasury_asset_account: Account<'info, TokenAccount>,

    #[account(mut, address = farm.reward_vault @ FarmError::VaultMismatch)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut, address = farm.dev_vault @ FarmError::VaultMismatch)]
    pub dev_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_reward_account.owner == user.key(),
        constraint = user_reward_account.mint == farm.reward_mint @ FarmError::MintMismatch
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, pool_id: u8, amount: u64) -> Result<()> {
    require!(pool_id != STAKING_POOL_ID, FarmError::UseStakingEntrypoints);
    ctx.accounts.position.ensure_can_withdraw(amount)?;

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

    let mut fee = 0u64;
    if amount > 0 {
        fee = ctx.accounts.farm.pool(pool_id)?.withdraw_fee(
            amount,
            ctx.accounts.position.deposit_time,
            clock.unix_timestamp,
        )?;

        let position = &mut ctx.accounts.position;
        position.amount = position
            .amount
            .checked_sub(amount)
            .ok_or(FarmError::MathOverflow)?;

        {
            let farm = &mut ctx.accounts.farm;
            let pool = farm.pool_mut(pool_id)?;
            pool.total_staked = pool
                .total_staked
                .checked_sub(amount)
                .ok_or(FarmError::MathOverflow)?;
        }

        let reward_mint_key = ctx.accounts.farm.reward_mint;
        let seeds = &[
            FARM_SEED,
            reward_mint_key.as_ref(),
            &[ctx.accounts.farm.bump],
        ];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.asset_vault.to_account_info(),
                    to: ctx.accounts.user_asset_account.to_account_info(),
                    authority: ctx.accounts.farm.to_account_info(),
                },
                signer_seeds,
            ),
            amount - fee,
        )?;
        if fee > 0 {
            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.asset_vault.to_account_info(),
                        to: ctx.accounts.treasury_asset_account.to_account_info(),
                        authority: ctx.accounts.farm.to_account_info(),
                    },
                    signer_seeds,
                ),
                fee,
            )?;
        }
    }

    let acc = ctx.accounts.farm.pool(pool_id)?.acc_reward_per_share;
    ctx.accounts.position.checkpoint(acc)?;

    msg!(
        "Withdraw pool {}: -{} (fee {}, staked {}), harvested {}",
        pool_id,
        amount,
        fee,
        ctx.accounts.position.amount,
        pending
    );

    Ok(())
}
