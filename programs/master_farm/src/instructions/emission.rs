//! Shared emission plumbing for settlement-bearing instructions.
//!
//! Every instruction that settles a pool mints the newly accrued reward to the
//! farm's reward vault (depositor share) and a tenth on top to the dev vault.
//! Payouts then come out of the reward vault, capped at whatever it holds so a
//! rounding shortfall can never make a harvest revert.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::state::Farm;

/// Mints `minted` reward to the reward vault plus the additive dev cut to the
/// dev vault. No-op when nothing accrued.
pub(crate) fn mint_emission<'info>(
    farm: &Account<'info, Farm>,
    reward_mint: &Account<'info, Mint>,
    reward_vault: &Account<'info, TokenAccount>,
    dev_vault: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    minted: u64,
) -> Result<()> {
    if minted == 0 {
        return Ok(());
    }
    let reward_mint_key = farm.reward_mint;
    let seeds = &[FARM_SEED, reward_mint_key.as_ref(), &[farm.bump]];
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            MintTo {
                mint: reward_mint.to_account_info(),
                to: reward_vault.to_account_info(),
                authority: farm.to_account_info(),
            },
            signer_seeds,
        ),
        minted,
    )?;

    let dev_cut = Farm::dev_cut(minted);
    if dev_cut > 0 {
        token::mint_to(
            CpiContext::new_with_signer(
                token_program.to_account_info(),
                MintTo {
                    mint: reward_mint.to_account_info(),
                    to: dev_vault.to_account_info(),
                    authority: farm.to_account_info(),
                },
                signer_seeds,
            ),
            dev_cut,
        )?;
    }
    Ok(())
}

/// Transfers `min(amount, vault balance)` of reward to `to`. The vault is
/// reloaded first because the same instruction usually just minted into it.
pub(crate) fn safe_reward_transfer<'info>(
    farm: &Account<'info, Farm>,
    reward_vault: &mut Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<u64> {
    reward_vault.reload()?;
    let payout = amount.min(reward_vault.amount);
    if payout == 0 {
        return Ok(0);
    }
    let reward_mint_key = farm.reward_mint;
    let seeds = &[FARM_SEED, reward_mint_key.as_ref(), &[farm.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: reward_vault.to_account_info(),
                to: to.to_account_info(),
                authority: farm.to_account_info(),
            },
            signer_seeds,
        ),
        payout,
    )?;
    Ok(payout)
}
