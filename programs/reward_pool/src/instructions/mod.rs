//! Instruction handlers for the reward pool program.

pub mod admin;
pub mod deposit;
pub mod emergency_reward_withdraw;
pub mod emergency_withdraw;
pub mod fund_rewards;
pub mod initialize;
pub mod withdraw;

pub(crate) mod payout;

pub use admin::*;
pub use deposit::*;
pub use emergency_reward_withdraw::*;
pub use emergency_withdraw::*;
pub use fund_rewards::*;
pub use initialize::*;
pub use withdraw::*;
