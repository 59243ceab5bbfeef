//! Role and receiver management.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;
use crate::state::LotteryPool;

/// Accounts for admin-gated configuration changes.
#[derive(Accounts)]
pub struct AdminUpdate<'info> {
    #[account(address = lottery.admin @ LotteryError::NotAdmin)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.farm.as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, LotteryPool>,
}

pub fn set_receiver_handler(ctx: Context<AdminUpdate>, receiver: Pubkey) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.receiver = receiver;
    msg!("Receiver set to {}", receiver);
    Ok(())
}

/// Accounts for handing the admin role to a new address. Owner-gated.
#[derive(Accounts)]
pub struct SetAdmin<'info> {
    #[account(address = lottery.authority @ LotteryError::Unauthorized)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.farm.as_ref()],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, LotteryPool>,
}

pub fn set_admin_handler(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.admin = new_admin;
    msg!("Admin set to {}", new_admin);
    Ok(())
}
