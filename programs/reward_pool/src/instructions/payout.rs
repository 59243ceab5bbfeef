//! Shared payout plumbing.
//!
//! The reward vault is funded up front rather than minted into, so a payout is
//! capped at the vault balance. A rounding shortfall or an underfunded vault
//! shortens the harvest instead of making it revert.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::state::RewardPool;

/// Transfers `min(amount, vault balance)` of reward to `to`, signed by the
/// pool PDA. Returns the amount actually paid.
pub(crate) fn safe_reward_transfer<'info>(
    pool: &Account<'info, RewardPool>,
    reward_vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<u64> {
    let payout = amount.min(reward_vault.amount);
    if payout == 0 {
        return Ok(0);
    }
    let staked_mint = pool.staked_mint;
    let reward_mint = pool.reward_mint;
    let seeds = &[
        REWARD_POOL_SEED,
        staked_mint.as_ref(),
        reward_mint.as_ref(),
        &[pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: reward_vault.to_account_info(),
                to: to.to_account_info(),
                authority: pool.to_account_info(),
            },
            signer_seeds,
        ),
        payout,
    )?;
    Ok(payout)
}
