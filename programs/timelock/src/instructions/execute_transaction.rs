//! Execute-transaction instruction handler.
//!
//! Replays the stored instruction via CPI, signing with the executor PDA for
//! any meta the queue marked as a signer. The transaction account closes on
//! success, so a queued action executes at most once. All accounts the inner
//! instruction touches ride in as remaining accounts.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::program::invoke_signed;

use crate::constants::*;
use crate::error::TimelockError;
use crate::state::{QueuedTransaction, Timelock};

#[derive(Accounts)]
pub struct ExecuteTransaction<'info> {
    #[account(mut, address = timelock.admin @ TimelockError::NotAdmin)]
    pub admin: Signer<'info>,

    #[account(seeds = [TIMELOCK_SEED], bump = timelock.bump)]
    pub timelock: Account<'info, Timelock>,

    /// CHECK: signer PDA for the inner instruction, holds no data.
    #[account(seeds = [EXECUTOR_SEED, timelock.key().as_ref()], bump = timelock.executor_bump)]
    pub executor: UncheckedAccount<'info>,

    #[account(
        mut,
        close = admin,
        constraint = transaction.timelock == timelock.key() @ TimelockError::TargetMismatch
    )]
    pub transaction: Account<'info, QueuedTransaction>,
}

pub fn handler(ctx: Context<ExecuteTransaction>) -> Result<()> {
    let clock = Clock::get()?;
    Timelock::validate_execution(ctx.accounts.transaction.eta, clock.unix_timestamp)?;

    let transaction = &ctx.accounts.transaction;
    let instruction = Instruction {
        program_id: transaction.target_program,
        accounts: transaction.accounts.iter().map(Into::into).collect(),
        data: transaction.data.clone(),
    };

    let timelock_key = ctx.accounts.timelock.key();
    let seeds = &[
        EXECUTOR_SEED,
        timelock_key.as_ref(),
        &[ctx.accounts.timelock.executor_bump],
    ];
    invoke_signed(&instruction, ctx.remaining_accounts, &[&seeds[..]])?;

    msg!(
        "Executed queued transaction for {}",
        transaction.target_program
    );
    Ok(())
}
