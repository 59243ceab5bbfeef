//! Account state for the timelock program.

pub mod timelock;

pub use timelock::*;
