//! Instruction handlers for the master farm program.

pub mod add_pool;
pub mod deposit;
pub mod dev;
pub mod emergency_withdraw;
pub(crate) mod emission;
pub mod initialize;
pub mod set_pool;
pub mod set_withdrawal_fee;
pub mod staking;
pub mod update_multiplier;
pub mod update_pool;
pub mod withdraw;

pub use add_pool::*;
pub use deposit::*;
pub use dev::*;
pub use emergency_withdraw::*;
pub use initialize::*;
pub use set_pool::*;
pub use set_withdrawal_fee::*;
pub use staking::*;
pub use update_multiplier::*;
pub use update_pool::*;
pub use withdraw::*;
