//! Self-governed parameter changes and the admin handoff.
//!
//! `set_delay` and `set_pending_admin` only accept the executor PDA as the
//! signer, so they can be reached exclusively through a queued-and-executed
//! transaction: the timelock governs itself under its own delay.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::TimelockError;
use crate::state::Timelock;

/// Accounts for executor-gated parameter changes.
#[derive(Accounts)]
pub struct SelfUpdate<'info> {
    #[account(
        seeds = [EXECUTOR_SEED, timelock.key().as_ref()],
        bump = timelock.executor_bump
    )]
    pub executor: Signer<'info>,

    #[account(mut, seeds = [TIMELOCK_SEED], bump = timelock.bump)]
    pub timelock: Account<'info, Timelock>,
}

pub fn set_delay_handler(ctx: Context<SelfUpdate>, delay: i64) -> Result<()> {
    Timelock::validate_delay(delay)?;
    let timelock = &mut ctx.accounts.timelock;
    timelock.delay = delay;
    msg!("Delay set to {}s", delay);
    Ok(())
}

pub fn set_pending_admin_handler(ctx: Context<SelfUpdate>, pending_admin: Pubkey) -> Result<()> {
    let timelock = &mut ctx.accounts.timelock;
    timelock.pending_admin = pending_admin;
    msg!("Pending admin set to {}", pending_admin);
    Ok(())
}

/// Accounts for the pending admin claiming the role.
#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    #[account(
        constraint = pending_admin.key() == timelock.pending_admin
            && timelock.pending_admin != Pubkey::default()
            @ TimelockError::NotPendingAdmin
    )]
    pub pending_admin: Signer<'info>,

    #[account(mut, seeds = [TIMELOCK_SEED], bump = timelock.bump)]
    pub timelock: Account<'info, Timelock>,
}

pub fn accept_admin_handler(ctx: Context<AcceptAdmin>) -> Result<()> {
    let timelock = &mut ctx.accounts.timelock;
    timelock.admin = ctx.accounts.pending_admin.key();
    timelock.pending_admin = Pubkey::default();
    msg!("Admin role claimed by {}", timelock.admin);
    Ok(())
}
