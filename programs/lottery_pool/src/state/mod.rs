//! Account state for the lottery pool program.

pub mod lottery;

pub use lottery::*;
