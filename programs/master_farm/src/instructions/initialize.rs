//! Initialize instruction handler.
//!
//! Creates the farm together with its reward/dev vaults, the staking receipt
//! mint, and pool 0 (the auto-staking pool whose asset is the reward token).
//! The reward mint's mint authority must be handed to the farm PDA before any
//! emission can be minted, mirroring an ownership transfer to the controller.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::state::{Farm, PoolInfo};

/// Accounts required for farm initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The authority that will own the farm (add/set pools, fees, multiplier).
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The farm account to be created, one per reward mint.
    #[account(
        init,
        payer = authority,
        space = Farm::LEN,
        seeds = [FARM_SEED, reward_mint.key().as_ref()],
        bump
    )]
    pub farm: Account<'info, Farm>,

    /// The reward token mint (HARV).
    pub reward_mint: Account<'info, Mint>,

    /// Receipt mint for the staking pool, minted/burned 1:1 against staked
    /// reward tokens. Authority is the farm PDA from birth.
    #[account(
        init,
        payer = authority,
        seeds = [RECEIPT_MINT_SEED, farm.key().as_ref()],
        bump,
        mint::decimals = reward_mint.decimals,
        mint::authority = farm
    )]
    pub receipt_mint: Account<'info, Mint>,

    /// Vault holding the staking pool's principal (pool 0).
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, farm.key().as_ref(), &[STAKING_POOL_ID]],
        bump,
        token::mint = reward_mint,
        token::authority = farm
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    /// Vault collecting minted-but-unclaimed reward.
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, farm.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = farm
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Vault collecting the additive dev cut.
    #[account(
        init,
        payer = authority,
        seeds = [DEV_VAULT_SEED, farm.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = farm
    )]
    pub dev_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(
    ctx: Context<Initialize>,
    reward_per_block: u64,
    start_block: u64,
    dev_address: Pubkey,
    treasury_address: Pubkey,
) -> Result<()> {
    let clock = Clock::get()?;
    let farm = &mut ctx.accounts.farm;

    farm.authority = ctx.accounts.authority.key();
    farm.reward_mint = ctx.accounts.reward_mint.key();
    farm.receipt_mint = ctx.accounts.receipt_mint.key();
    farm.reward_vault = ctx.accounts.reward_vault.key();
    farm.dev_vault = ctx.accounts.dev_vault.key();
    farm.dev_address = dev_address;
    farm.treasury_address = treasury_address;
    farm.reward_per_block = reward_per_block;
    farm.bonus_multiplier = 1;
    farm.start_block = start_block;
    farm.total_alloc_point = INITIAL_STAKING_ALLOC;
    farm.pools = vec![PoolInfo {
        asset_mint: ctx.accounts.reward_mint.key(),
        asset_vault: ctx.accounts.staking_vault.key(),
        alloc_point: INITIAL_STAKING_ALLOC,
        last_reward_block: start_block.max(clock.slot),
        acc_reward_per_share: 0,
        total_staked: 0,
        withdraw_fee_bps: 0,
        withdraw_fee_window: 0,
    }];
    farm.bump = ctx.bumps.farm;
    farm.reward_vault_bump = ctx.bumps.reward_vault;
    farm.dev_vault_bump = ctx.bumps.dev_vault;

    msg!("Farm initialized for mint {}", farm.reward_mint);
    msg!(
        "Emission: {} per block from block {}",
        reward_per_block,
        start_block
    );
    msg!("Dev: {}, treasury: {}", dev_address, treasury_address);

    Ok(())
}
