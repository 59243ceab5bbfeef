//! Update-multiplier instruction handler.
//!
//! Rescales the effective emission rate for all future accrual. Every pool is
//! settled to the current slot first, so already-earned reward is untouched no
//! matter which direction the multiplier moves.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::FarmError;
use crate::instructions::emission::mint_emission;
use crate::state::Farm;

#[derive(Accounts)]
pub struct UpdateMultiplier<'info> {
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

pub fn handler(ctx: Context<UpdateMultiplier>, new_multiplier: u64) -> Result<()> {
    let clock = Clock::get()?;

    let minted = ctx.accounts.farm.settle_all_pools(clock.slot)?;
    mint_emission(
        &ctx.accounts.farm,
        &ctx.accounts.reward_mint,
        &ctx.accounts.reward_vault,
        &ctx.accounts.dev_vault,
        &ctx.accounts.token_program,
        minted,
    )?;

    let farm = &mut ctx.accounts.farm;
    let previous = farm.bonus_multiplier;
    farm.bonus_multiplier = new_multiplier;

    msg!("Bonus multiplier {} -> {}", previous, new_multiplier);

    Ok(())
}
