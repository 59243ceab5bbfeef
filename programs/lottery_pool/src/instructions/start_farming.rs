//! Start-farming instruction handler.
//!
//! Stakes the lottery's pooled asset balance into a farm pool. The lottery
//! PDA signs the farm deposit, so the position belongs to the lottery and
//! every later harvest flows back through it.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use master_farm::cpi::accounts::Deposit as FarmDeposit;
use master_farm::program::MasterFarm;

use crate::constants::*;
use crate::error::LotteryError;
use crate::state::LotteryPool;

#[derive(Accounts)]
pub struct StartFarming<'info> {
    #[account(mut, address = lottery.admin @ LotteryError::NotAdmin)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.farm.as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, LotteryPool>,

    #[account(mut, address = lottery.farm @ LotteryError::AccountMismatch)]
    pub farm: Account<'info, master_farm::state::Farm>,

    /// The lottery's position in the target pool, created by the farm on the
    /// first deposit with the admin paying rent.
    /// CHECK: created and validated by the farm program.
    #[account(mut)]
    pub position: UncheckedAccount<'info>,

    /// CHECK: validated against the farm by the farm program.
    #[account(mut)]
    pub reward_mint: UncheckedAccount<'info>,

    /// CHECK: validated against the pool by the farm program.
    #[account(mut)]
    pub asset_vault: UncheckedAccount<'info>,

    /// The lottery's holding account for the pool asset.
    #[account(
        mut,
        constraint = lottery_asset_account.owner == lottery.key() @ LotteryError::AccountMismatch
    )]
    pub lottery_asset_account: Account<'info, TokenAccount>,

    /// CHECK: validated against the farm by the farm program.
    #[account(mut)]
    pub reward_vault: UncheckedAccount<'info>,

    /// CHECK: validated against the farm by the farm program.
    #[account(mut)]
    pub dev_vault: UncheckedAccount<'info>,

    /// The lottery's reward holding account, harvest destination.
    #[account(
        mut,
        constraint = lottery_reward_account.owner == lottery.key() @ LotteryError::AccountMismatch
    )]
    pub lottery_reward_account: Account<'info, TokenAccount>,

    pub master_farm_program: Program<'info, MasterFarm>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<StartFarming>, pool_id: u8, amount: u64) -> Result<()> {
    let farm_key = ctx.accounts.lottery.farm;
    let seeds = &[LOTTERY_SEED, farm_key.as_ref(), &[ctx.accounts.lottery.bump]];
    let signer_seeds = &[&seeds[..]];

    master_farm::cpi::deposit(
        CpiContext::new_with_signer(
            ctx.accounts.master_farm_program.to_account_info(),
            FarmDeposit {
                user: ctx.accounts.lottery.to_account_info(),
                payer: ctx.accounts.admin.to_account_info(),
                farm: ctx.accounts.farm.to_account_info(),
                position: ctx.accounts.position.to_account_info(),
                reward_mint: ctx.accounts.reward_mint.to_account_info(),
                asset_vault: ctx.accounts.asset_vault.to_account_info(),
                user_asset_account: ctx.accounts.lottery_asset_account.to_account_info(),
                reward_vault: ctx.accounts.reward_vault.to_account_info(),
                dev_vault: ctx.accounts.dev_vault.to_account_info(),
                user_reward_account: ctx.accounts.lottery_reward_account.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
                rent: ctx.accounts.rent.to_account_info(),
            },
            signer_seeds,
        ),
        pool_id,
        amount,
    )?;

    msg!("Farming started: {} staked into pool {}", amount, pool_id);
    Ok(())
}
