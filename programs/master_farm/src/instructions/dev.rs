//! Dev-address administration.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FarmError;
use crate::state::Farm;

/// Only the current dev may hand the role over.
#[derive(Accounts)]
pub struct SetDevAddress<'info> {
    #[account(
        constraint = dev.key() == farm.dev_address @ FarmError::NotDev
    )]
    pub dev: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,
}

pub fn set_dev_address_handler(ctx: Context<SetDevAddress>, new_dev: Pubkey) -> Result<()> {
    let farm = &mut ctx.accounts.farm;
    let previous = farm.dev_address;
    farm.dev_address = new_dev;
    msg!("Dev address {} -> {}", previous, new_dev);
    Ok(())
}

/// Sweeps the accrued dev cut out of the dev vault.
#[derive(Accounts)]
pub struct CollectDevFees<'info> {
    #[account(
        constraint = dev.key() == farm.dev_address @ FarmError::NotDev
    )]
    pub dev: Signer<'info>,

    #[account(
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    #[account(mut, address = farm.dev_vault @ FarmError::VaultMismatch)]
    pub dev_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = dev_reward_account.owner == farm.dev_address @ FarmError::NotDev,
        constraint = dev_reward_account.mint == farm.reward_mint @ FarmError::MintMismatch
    )]
    pub dev_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn collect_dev_fees_handler(ctx: Context<CollectDevFees>) -> Result<()> {
    let amount = ctx.accounts.dev_vault.amount;
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
                    from: ctx.accounts.dev_vault.to_account_info(),
                    to: ctx.accounts.dev_reward_account.to_account_info(),
                    authority: ctx.accounts.farm.to_account_info(),
                },
                &[&seeds[..]],
            ),
            amount,
        )?;
    }
    msg!("Dev fees collected: {}", amount);
    Ok(())
}
