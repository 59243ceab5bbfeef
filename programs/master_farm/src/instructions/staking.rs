//! Enter/leave staking instruction handlers.
//!
//! Pool 0 stakes the reward token itself. The depositor receives receipt
//! tokens minted 1:1 against the staked principal; leaving burns them back.
//! Accrual is otherwise identical to any other pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FarmError;
use crate::instructions::emission::{mint_emission, safe_reward_transfer};
use crate::state::{Farm, Position};

#[derive(Accounts)]
pub struct EnterStaking<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    #[account(
        init_if_needed,
        payer = user,
        space = Position::LEN,
        seeds = [POSITION_SEED, farm.key().as_ref(), &[STAKING_POOL_ID], user.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(mut, address = farm.reward_mint @ FarmError::MintMismatch)]
    pub reward_mint: Account<'info, Mint>,

    #[account(mut, address = farm.receipt_mint @ FarmError::MintMismatch)]
    pub receipt_mint: Account<'info, Mint>,

    /// Pool 0's principal vault (holds staked reward tokens).
    #[account(
        mut,
        constraint = farm.pools.first()
            .map(|p| p.asset_vault == staking_vault.key())
            .unwrap_or(false) @ FarmError::VaultMismatch
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    #[account(mut, address = farm.reward_vault @ FarmError::VaultMismatch)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut, address = farm.dev_vault @ FarmError::VaultMismatch)]
    pub dev_vault: Account<'info, TokenAccount>,

    /// User's reward token account: source of the staked principal and
    /// destination of the harvest.
    #[account(
        mut,
        constraint = user_reward_account.owner == user.key(),
        constraint = user_reward_account.mint == farm.reward_mint @ FarmError::MintMismatch
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    /// User's receipt token account.
    #[account(
        mut,
        constraint = user_receipt_account.owner == user.key(),
        constraint = user_receipt_account.mint == farm.receipt_mint @ FarmError::MintMismatch
    )]
    pub user_receipt_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn enter_handler(ctx: Context<EnterStaking>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let minted = ctx.accounts.farm.settle_pool(STAKING_POOL_ID, clock.slot)?;
    mint_emission(
        &ctx.accounts.farm,
        &ctx.accounts.reward_mint,
        &ctx.accounts.reward_vault,
        &ctx.accounts.dev_vault,
        &ctx.accounts.token_program,
        minted,
    )?;

    if ctx.accounts.position.owner == Pubkey::default() {
        let position = &mut ctx.accounts.position;
        position.farm = ctx.accounts.farm.key();
        position.owner = ctx.accounts.user.key();
        position.pool_id = STAKING_POOL_ID;
        position.bump = ctx.bumps.position;
    }

    let pending = ctx
        .accounts
        .farm
        .pool(STAKING_POOL_ID)?
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
                    from: ctx.accounts.user_reward_account.to_account_info(),
                    to: ctx.accounts.staking_vault.to_account_info(),
                    authority: ctx.accounts.user.to_account_info(),
                },
            ),
            amount,
        )?;

        // receipt tokens track principal 1:1
        let reward_mint_key = ctx.accounts.farm.reward_mint;
        let seeds = &[
            FARM_SEED,
            reward_mint_key.as_ref(),
            &[ctx.accounts.farm.bump],
        ];
        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: ctx.accounts.receipt_mint.to_account_info(),
                    to: ctx.accounts.user_receipt_account.to_account_info(),
                    authority: ctx.accounts.farm.to_account_info(),
                },
                &[&seeds[..]],
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
        let pool = farm.pool_mut(STAKING_POOL_ID)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(FarmError::MathOverflow)?;
    }

    let acc = ctx
        .accounts
        .farm
        .pool(STAKING_POOL_ID)?
        .acc_reward_per_share;
    ctx.accounts.position.checkpoint(acc)?;

    msg!(
        "Enter staking: +{} (staked {}), harvested {}",
        amount,
        ctx.accounts.position.amount,
        pending
    );

    Ok(())
}

#[derive(Accounts)]
pub struct LeaveStaking<'info> {
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
        seeds = [POSITION_SEED, farm.key().as_ref(), &[STAKING_POOL_ID], user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ FarmError::Unauthorized
    )]
    pub position: Account<'info, Position>,

    #[account(mut, address = farm.reward_mint @ FarmError::MintMismatch)]
    pub reward_mint: Account<'info, Mint>,

    #[account(mut, address = farm.receipt_mint @ FarmError::MintMismatch)]
    pub receipt_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = farm.pools.first()
            .map(|p| p.asset_vault == staking_vault.key())
            .unwrap_or(false) @ FarmError::VaultMismatch
    )]
    pub staking_vault: Account<'info, TokenAccount>,

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

    /// Receipts are burned 1:1 against the withdrawn principal.
    #[account(
        mut,
        constraint = user_receipt_account.owner == user.key(),
        constraint = user_receipt_account.mint == farm.receipt_mint @ FarmError::MintMismatch
    )]
    pub user_receipt_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn leave_handler(ctx: Context<LeaveStaking>, amount: u64) -> Result<()> {
    ctx.accounts.position.ensure_can_withdraw(amount)?;

    let clock = Clock::get()?;

    let minted = ctx.accounts.farm.settle_pool(STAKING_POOL_ID, clock.slot)?;
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
        .pool(STAKING_POOL_ID)?
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
        token::burn(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Burn {
                    mint: ctx.accounts.receipt_mint.to_account_info(),
                    from: ctx.accounts.user_receipt_account.to_account_info(),
                    authority: ctx.accounts.user.to_account_info(),
                },
            ),
            amount,
        )?;

        let reward_mint_key = ctx.accounts.farm.reward_mint;
        let seeds = &[
            FARM_SEED,
            reward_mint_key.as_ref(),
            &[ctx.accounts.farm.bump],
        ];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.staking_vault.to_account_info(),
                    to: ctx.accounts.user_reward_account.to_account_info(),
                    authority: ctx.accounts.farm.to_account_info(),
                },
                &[&seeds[..]],
            ),
            amount,
        )?;

        let position = &mut ctx.accounts.position;
        position.amount = position
            .amount
            .checked_sub(amount)
            .ok_or(FarmError::MathOverflow)?;

        let farm = &mut ctx.accounts.farm;
        let pool = farm.pool_mut(STAKING_POOL_ID)?;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(FarmError::MathOverflow)?;
    }

    let acc = ctx
        .accounts
        .farm
        .pool(STAKING_POOL_ID)?
        .acc_reward_per_share;
    ctx.accounts.position.checkpoint(acc)?;

    msg!(
        "Leave staking: -{} (staked {}), harvested {}",
        amount,
        ctx.accounts.position.amount,
        pending
    );

    Ok(())
}
