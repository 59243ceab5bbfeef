//! State structures for the master farm program.

pub mod farm;

pub use farm::*;
