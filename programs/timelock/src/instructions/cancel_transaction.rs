//! Cancel-transaction instruction handler.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::TimelockError;
use crate::state::{QueuedTransaction, Timelock};

/// Closes a queued transaction, refunding rent to the admin. Valid at any
/// time before execution, including after the grace period.
#[derive(Accounts)]
pub struct CancelTransaction<'info> {
    #[account(mut, address = timelock.admin @ TimelockError::NotAdmin)]
    pub admin: Signer<'info>,

    #[account(seeds = [TIMELOCK_SEED], bump = timelock.bump)]
    pub timelock: Account<'info, Timelock>,

    #[account(
        mut,
        close = admin,
        constraint = transaction.timelock == timelock.key() @ TimelockError::TargetMismatch
    )]
    pub transaction: Account<'info, QueuedTransaction>,
}

pub fn handler(ctx: Context<CancelTransaction>) -> Result<()> {
    msg!(
        "Cancelled queued transaction for {}",
        ctx.accounts.transaction.target_program
    );
    Ok(())
}
