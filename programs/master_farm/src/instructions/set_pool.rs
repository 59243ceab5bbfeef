//! Set-pool instruction handler: re-weights an existing pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FarmError;
use crate::instructions::emission::mint_emission;
use crate::state::Farm;

#[derive(Accounts)]
pub struct SetPool<'info> {
    #[account(
        constraint = authority.key() == farm.authority @ FarmError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    #[account(mut, address = farm.reward_mint @ FarmError::MintMismatch)]
    pub reward_mint: Account<'info, Mint>,

    #[account(mut, address = farm.reward_vault @ FarmError::VaultMismatch)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut, address = farm.dev_vault @ FarmError::VaultMismatch)]
    pub dev_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<SetPool>, pool_id: u8, alloc_point: u64, with_update: bool) -> Result<()> {
    require!(
        pool_id != STAKING_POOL_ID,
        FarmError::UseStakingEntrypoints
    );

    let clock = Clock::get()?;

    let minted = if with_update {
        ctx.accounts.farm.settle_all_pools(clock.slot)?
    } else {
        0
    };
    mint_emission(
        &ctx.accounts.farm,
        &ctx.accounts.reward_mint,
        &ctx.accounts.reward_vault,
        &ctx.accounts.dev_vault,
        &ctx.accounts.token_program,
        minted,
    )?;

    let farm = &mut ctx.accounts.farm;
    let previous = farm.pool(pool_id)?.alloc_point;
    farm.pool_mut(pool_id)?.alloc_point = alloc_point;
    farm.total_alloc_point = farm
        .total_alloc_point
        .checked_sub(previous)
        .ok_or(FarmError::MathOverflow)?
        .checked_add(alloc_point)
        .ok_or(FarmError::MathOverflow)?;
    farm.rebalance_staking_pool()?;

    msg!("Pool {} alloc {} -> {}", pool_id, previous, alloc_point);
    msg!("Total alloc {}", farm.total_alloc_point);

    Ok(())
}
