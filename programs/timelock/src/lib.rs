//! # Timelock Program
//!
//! Delay-enforced executor for governance actions. The admin queues a fully
//! specified instruction with an ETA at least `delay` seconds out; once the
//! ETA passes (and before a 14-day grace period lapses) the admin executes
//! it, and the executor PDA co-signs the inner instruction. Target programs
//! are placed under timelock control by handing their authority to that PDA.
//!
//! ## Features
//! - Queue/execute/cancel keyed by hash(target, data, eta)
//! - Delay bounded to [6 hours, 30 days]; 14-day execution grace period
//! - Self-governed delay and admin changes (only reachable via execution)
//! - Two-step admin handoff through a pending admin

use anchor_lang::prelude::*;

declare_id!("GoSkkW8EdeGTK2LQJ7y5zFeQ5V6yWfFDdmRSLw7rXCDY");

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;
use state::TransactionAccount;

#[program]
pub mod timelock {
    use super::*;

    /// Creates the timelock and its executor PDA.
    pub fn initialize(ctx: Context<Initialize>, admin: Pubkey, delay: i64) -> Result<()> {
        instructions::initialize::handler(ctx, admin, delay)
    }

    /// Queues an instruction for execution no earlier than `eta`.
    pub fn queue_transaction(
        ctx: Context<QueueTransaction>,
        target_program: Pubkey,
        accounts: Vec<TransactionAccount>,
        data: Vec<u8>,
        eta: i64,
    ) -> Result<()> {
        instructions::queue_transaction::handler(ctx, target_program, accounts, data, eta)
    }

    /// Executes a queued instruction inside its validity window and closes it.
    pub fn execute_transaction(ctx: Context<ExecuteTransaction>) -> Result<()> {
        instructions::execute_transaction::handler(ctx)
    }

    /// Discards a queued instruction and refunds its rent.
    pub fn cancel_transaction(ctx: Context<CancelTransaction>) -> Result<()> {
        instructions::cancel_transaction::handler(ctx)
    }

    /// Changes the delay. Only callable by the executor PDA.
    pub fn set_delay(ctx: Context<SelfUpdate>, delay: i64) -> Result<()> {
        instructions::admin::set_delay_handler(ctx, delay)
    }

    /// Nominates a new admin. Only callable by the executor PDA.
    pub fn set_pending_admin(ctx: Context<SelfUpdate>, pending_admin: Pubkey) -> Result<()> {
        instructions::admin::set_pending_admin_handler(ctx, pending_admin)
    }

    /// Completes the admin handoff. Only the pending admin may call.
    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        instructions::admin::accept_admin_handler(ctx)
    }
}
