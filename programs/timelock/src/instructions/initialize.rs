//! Initialize instruction handler.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::Timelock;

/// Accounts required for timelock creation.
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = Timelock::LEN,
        seeds = [TIMELOCK_SEED],
        bump
    )]
    pub timelock: Account<'info, Timelock>,

    /// The PDA that signs executed transactions. Point target programs'
    /// authority at this address to place them under timelock control.
    /// CHECK: derived address only, holds no data.
    #[account(seeds = [EXECUTOR_SEED, timelock.key().as_ref()], bump)]
    pub executor: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, admin: Pubkey, delay: i64) -> Result<()> {
    Timelock::validate_delay(delay)?;

    let timelock = &mut ctx.accounts.timelock;
    timelock.admin = admin;
    timelock.pending_admin = Pubkey::default();
    timelock.delay = delay;
    timelock.bump = ctx.bumps.timelock;
    timelock.executor_bump = ctx.bumps.executor;

    msg!(
        "Timelock initialized: admin {}, delay {}s, executor {}",
        admin,
        delay,
        ctx.accounts.executor.key()
    );
    Ok(())
}
