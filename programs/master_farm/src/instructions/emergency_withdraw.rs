//! Emergency withdraw instruction handler.
//!
//! Returns the full principal immediately and zeroes the position without any
//! settlement. Pending reward is deliberately forfeited so the exit works even
//! if reward accounting is wedged. The staking pool is excluded because its
//! principal is tied to outstanding receipt tokens; `leave_staking` is the
//! exit there.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FarmError;
use crate::state::{Farm, Position};

#[derive(Accounts)]
#[instruction(pool_id: u8)]
pub struct EmergencyWithdraw<'info> {
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

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EmergencyWithdraw>, pool_id: u8) -> Result<()> {
    require!(pool_id != STAKING_POOL_ID, FarmError::UseStakingEntrypoints);

    let amount = ctx.accounts.position.amount;

    if amount > 0 {
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
                    from: ctx.accounts.asset_vault.to_account_info(),
                    to: ctx.accounts.user_asset_account.to_account_info(),
                    authority: ctx.accounts.farm.to_account_info(),
                },
                &[&seeds[..]],
            ),
            amount,
        )?;

        let farm = &mut ctx.accounts.farm;
        let pool = farm.pool_mut(pool_id)?;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(FarmError::MathOverflow)?;
    }

    let position = &mut ctx.accounts.position;
    position.amount = 0;
    position.reward_debt = 0;

    msg!("Emergency withdraw pool {}: {} returned, reward forfeited", pool_id, amount);

    Ok(())
}
