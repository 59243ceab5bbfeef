//! Instruction handlers for the lottery pool program.

pub mod admin;
pub mod harvest;
pub mod initialize;
pub mod start_farming;

pub use admin::*;
pub use harvest::*;
pub use initialize::*;
pub use start_farming::*;
