//! Program constants for the reward pool.

/// Seed for deriving the pool PDA
pub const REWARD_POOL_SEED: &[u8] = b"reward_pool";

/// Seed for deriving the staked-asset vault PDA
pub const STAKED_VAULT_SEED: &[u8] = b"staked_vault";

/// Seed for deriving the reward vault PDA
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Seed for deriving user position PDAs
pub const POSITION_SEED: &[u8] = b"position";

/// Precision multiplier for the per-share reward accumulator
pub const ACC_PRECISION: u128 = 1_000_000_000_000; // 10^12
