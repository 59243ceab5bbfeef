//! Account state for the reward pool program.

pub mod pool;

pub use pool::*;
