//! Harvest instruction handler.
//!
//! A zero-amount farm deposit settles the pool and pays the lottery's pending
//! reward into its holding account; the balance delta is then forwarded to
//! the receiver, minus the admin's basis-point cut.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use master_farm::cpi::accounts::Deposit as FarmDeposit;
use master_farm::program::MasterFarm;

use crate::constants::*;
use crate::error::LotteryError;
use crate::state::LotteryPool;

#[derive(Accounts)]
pub struct Harvest<'info> {
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

    /// CHECK: validated by the farm program.
    #[account(mut)]
    pub position: UncheckedAccount<'info>,

    /// CHECK: validated by the farm program.
    #[account(mut)]
    pub reward_mint: UncheckedAccount<'info>,

    /// CHECK: validated by the farm program.
    #[account(mut)]
    pub asset_vault: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = lottery_asset_account.owner == lottery.key() @ LotteryError::AccountMismatch
    )]
    pub lottery_asset_account: Account<'info, TokenAccount>,

    /// CHECK: validated by the farm program.
    #[account(mut)]
    pub reward_vault: UncheckedAccount<'info>,

    /// CHECK: validated by the farm program.
    #[account(mut)]
    pub dev_vault: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = lottery_reward_account.owner == lottery.key() @ LotteryError::AccountMismatch
    )]
    pub lottery_reward_account: Account<'info, TokenAccount>,

    /// Receiver's reward token account.
    #[account(
        mut,
        constraint = receiver_reward_account.owner == lottery.receiver @ LotteryError::AccountMismatch,
        constraint = receiver_reward_account.mint == lottery_reward_account.mint
            @ LotteryError::AccountMismatch
    )]
    pub receiver_reward_account: Account<'info, TokenAccount>,

    /// Admin's reward token account, destination of the fee cut.
    #[account(
        mut,
        constraint = admin_reward_account.owner == admin.key() @ LotteryError::AccountMismatch,
        constraint = admin_reward_account.mint == lottery_reward_account.mint
            @ LotteryError::AccountMismatch
    )]
    pub admin_reward_account: Account<'info, TokenAccount>,

    pub master_farm_program: Program<'info, MasterFarm>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<Harvest>, pool_id: u8) -> Result<()> {
    let before = ctx.accounts.lottery_reward_account.amount;
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
        0,
    )?;

    // the harvest just landed in the holding account; forward only the delta
    ctx.accounts.lottery_reward_account.reload()?;
    let harvested = ctx
        .accounts
        .lottery_reward_account
        .amount
        .checked_sub(before)
        .ok_or(LotteryError::MathOverflow)?;
    if harvested == 0 {
        msg!("Nothing to forward");
        return Ok(());
    }

    let (fee, forwarded) = ctx.accounts.lottery.split_harvest(harvested)?;

    if fee > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.lottery_reward_account.to_account_info(),
                    to: ctx.accounts.admin_reward_account.to_account_info(),
                    authority: ctx.accounts.lottery.to_account_info(),
                },
                signer_seeds,
            ),
            fee,
        )?;
    }

    if forwarded > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.lottery_reward_account.to_account_info(),
                    to: ctx.accounts.receiver_reward_account.to_account_info(),
                    authority: ctx.accounts.lottery.to_account_info(),
                },
                signer_seeds,
            ),
            forwarded,
        )?;
    }

    msg!(
        "Harvest forwarded: {} to receiver, {} fee",
        forwarded,
        fee
    );
    Ok(())
}
