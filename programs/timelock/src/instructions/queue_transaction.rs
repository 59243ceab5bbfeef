//! Queue-transaction instruction handler.
//!
//! Stores a complete instruction (target program, account metas, data) under
//! an address derived from hash(target, data, eta). The ETA must leave at
//! least the configured delay from now.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::TimelockError;
use crate::state::{QueuedTransaction, Timelock, TransactionAccount};

#[derive(Accounts)]
#[instruction(target_program: Pubkey, accounts: Vec<TransactionAccount>, data: Vec<u8>, eta: i64)]
pub struct QueueTransaction<'info> {
    #[account(mut, address = timelock.admin @ TimelockError::NotAdmin)]
    pub admin: Signer<'info>,

    #[account(seeds = [TIMELOCK_SEED], bump = timelock.bump)]
    pub timelock: Account<'info, Timelock>,

    #[account(
        init,
        payer = admin,
        space = QueuedTransaction::space(accounts.len(), data.len()),
        seeds = [
            TRANSACTION_SEED,
            timelock.key().as_ref(),
            &QueuedTransaction::tx_hash(&target_program, &data, eta),
        ],
        bump
    )]
    pub transaction: Account<'info, QueuedTransaction>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<QueueTransaction>,
    target_program: Pubkey,
    accounts: Vec<TransactionAccount>,
    data: Vec<u8>,
    eta: i64,
) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts.timelock.validate_eta(eta, clock.unix_timestamp)?;

    let transaction = &mut ctx.accounts.transaction;
    transaction.timelock = ctx.accounts.timelock.key();
    transaction.target_program = target_program;
    transaction.accounts = accounts;
    transaction.data = data;
    transaction.eta = eta;
    transaction.bump = ctx.bumps.transaction;

    msg!(
        "Queued transaction for {} at eta {}",
        target_program,
        eta
    );
    Ok(())
}
