//! # Lottery Pool Program
//!
//! Puts pooled lottery funds to work in the master farm. The lottery PDA is
//! the depositor: it stakes the pooled asset, and each harvest settles the
//! farm position and forwards the reward to a configured receiver, minus an
//! optional basis-point cut for the admin.

use anchor_lang::prelude::*;

declare_id!("CTsE7WYws3ziF7TSzyA4gc2zyL8PS3KPEi1iTbc6WkEg");

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;

#[program]
pub mod lottery_pool {
    use super::*;

    /// Creates the lottery pool for one farm.
    pub fn initialize(
        ctx: Context<Initialize>,
        admin: Pubkey,
        receiver: Pubkey,
        admin_fee_bps: u16,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, admin, receiver, admin_fee_bps)
    }

    /// Stakes pooled funds into a farm pool. Admin only.
    pub fn start_farming(ctx: Context<StartFarming>, pool_id: u8, amount: u64) -> Result<()> {
        instructions::start_farming::handler(ctx, pool_id, amount)
    }

    /// Settles the farm position and forwards the reward. Admin only.
    pub fn harvest(ctx: Context<Harvest>, pool_id: u8) -> Result<()> {
        instructions::harvest::handler(ctx, pool_id)
    }

    /// Retargets the harvest destination. Admin only.
    pub fn set_receiver(ctx: Context<AdminUpdate>, receiver: Pubkey) -> Result<()> {
        instructions::admin::set_receiver_handler(ctx, receiver)
    }

    /// Hands the admin role to a new address. Owner only.
    pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::set_admin_handler(ctx, new_admin)
    }
}
