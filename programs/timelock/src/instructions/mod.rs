//! Instruction handlers for the timelock program.

pub mod admin;
pub mod cancel_transaction;
pub mod execute_transaction;
pub mod initialize;
pub mod queue_transaction;

pub use admin::*;
pub use cancel_transaction::*;
pub use execute_transaction::*;
pub use initialize::*;
pub use queue_transaction::*;
