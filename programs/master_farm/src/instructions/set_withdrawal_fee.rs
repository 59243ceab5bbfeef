//! Set-withdrawal-fee instruction handler.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FarmError;
use crate::state::Farm;

#[derive(Accounts)]
pub struct SetWithdrawalFee<'info> {
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
}

pub fn handler(
    ctx: Context<SetWithdrawalFee>,
    pool_id: u8,
    fee_bps: u16,
    fee_window_seconds: i64,
) -> Result<()> {
    Farm::validate_withdraw_fee(fee_bps, fee_window_seconds)?;

    let farm = &mut ctx.accounts.farm;
    let pool = farm.pool_mut(pool_id)?;
    pool.withdraw_fee_bps = fee_bps;
    pool.withdraw_fee_window = fee_window_seconds;

    msg!(
        "Pool {} withdrawal fee: {} bps over {} seconds",
        pool_id,
        fee_bps,
        fee_window_seconds
    );

    Ok(())
}
