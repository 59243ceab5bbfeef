//! Program constants for the lottery pool.

/// Seed for deriving the lottery pool PDA
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Denominator for the admin fee, expressed in basis points
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;
