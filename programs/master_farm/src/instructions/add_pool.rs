//! Add-pool instruction handler.
//!
//! Appends a new weighted pool for an asset. When `with_update` is set, every
//! existing pool is settled first so the weight change never reaches back into
//! past accrual. The staking pool's weight is rebalanced afterwards.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FarmError;
use crate::instructions::emission::mint_emission;
use crate::state::{Farm, PoolInfo};

#[derive(Accounts)]
pub struct AddPool<'info> {
    #[account(
        mut,
        constraint = authority.key() == farm.authority @ FarmError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// Mint of the asset the new pool accepts.
    pub asset_mint: Account<'info, Mint>,

    /// Vault for the new pool's principal, keyed by the next pool id.
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, farm.key().as_ref(), &[farm.pools.len() as u8]],
        bump,
        token::mint = asset_mint,
        token::authority = farm
    )]
    pub asset_vault: Account<'info, TokenAccount>,

    /// The reward mint, needed when settling mints emission.
    #[account(mut, address = farm.reward_mint @ FarmError::MintMismatch)]
    pub reward_mint: Account<'info, Mint>,

    #[account(mut, address = farm.reward_vault @ FarmError::VaultMismatch)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut, address = farm.dev_vault @ FarmError::VaultMismatch)]
    pub dev_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<AddPool>, alloc_point: u64, with_update: bool) -> Result<()> {
    require!(alloc_point > 0, FarmError::ZeroAllocation);
    require!(
        ctx.accounts.farm.pools.len() < MAX_POOLS,
        FarmError::TooManyPools
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
    let pool_id = farm.pools.len() as u8;
    let last_reward_block = farm.start_block.max(clock.slot);
    farm.pools.push(PoolInfo {
        asset_mint: ctx.accounts.asset_mint.key(),
        asset_vault: ctx.accounts.asset_vault.key(),
        alloc_point,
        last_reward_block,
        acc_reward_per_share: 0,
        total_staked: 0,
        withdraw_fee_bps: 0,
        withdraw_fee_window: 0,
    });
    farm.total_alloc_point = farm
        .total_alloc_point
        .checked_add(alloc_point)
        .ok_or(FarmError::MathOverflow)?;
    farm.rebalance_staking_pool()?;

    msg!(
        "Pool {} added: mint {}, alloc {}",
        pool_id,
        ctx.accounts.asset_mint.key(),
        alloc_point
    );
    msg!(
        "Staking pool alloc {}, total {}",
        farm.pools[STAKING_POOL_ID as usize].alloc_point,
        farm.total_alloc_point
    );

    Ok(())
}
