//! Initialize instruction handler.
//!
//! Creates the lottery pool PDA, one per farm. The PDA itself is the
//! depositor of record in the farm, so it must own token accounts for the
//! staked asset and the reward before `start_farming` is called; position
//! rent is paid by the admin signing the deposit.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;
use crate::state::LotteryPool;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = LotteryPool::LEN,
        seeds = [LOTTERY_SEED, farm.key().as_ref()],
        bump
    )]
    pub lottery: Account<'info, LotteryPool>,

    /// The master farm this lottery pool will stake into.
    pub farm: Account<'info, master_farm::state::Farm>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    admin: Pubkey,
    receiver: Pubkey,
    admin_fee_bps: u16,
) -> Result<()> {
    require!(
        admin_fee_bps as u64 <= BASIS_POINTS_DENOMINATOR,
        LotteryError::FeeTooLarge
    );

    let lottery = &mut ctx.accounts.lottery;
    lottery.authority = ctx.accounts.authority.key();
    lottery.admin = admin;
    lottery.receiver = receiver;
    lottery.farm = ctx.accounts.farm.key();
    lottery.admin_fee_bps = admin_fee_bps;
    lottery.bump = ctx.bumps.lottery;

    msg!(
        "Lottery pool initialized for farm {}: receiver {}, admin fee {} bps",
        lottery.farm,
        receiver,
        admin_fee_bps
    );
    Ok(())
}
