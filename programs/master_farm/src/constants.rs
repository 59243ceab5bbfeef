//! Program constants for the master farm.

/// Seed for deriving the farm PDA
pub const FARM_SEED: &[u8] = b"farm";

/// Seed for deriving per-pool asset vault PDAs
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed for deriving the reward vault PDA (holds minted-but-unclaimed HARV)
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Seed for deriving the dev vault PDA (holds the dev cut)
pub const DEV_VAULT_SEED: &[u8] = b"dev_vault";

/// Seed for deriving user position PDAs
pub const POSITION_SEED: &[u8] = b"position";

/// Seed for deriving the staking receipt mint PDA
pub const RECEIPT_MINT_SEED: &[u8] = b"receipt_mint";

/// Maximum number of pools a farm can carry
pub const MAX_POOLS: usize = 16;

/// Index of the auto-staking pool (HARV staked for receipt tokens)
pub const STAKING_POOL_ID: u8 = 0;

/// Allocation points given to the staking pool at creation
pub const INITIAL_STAKING_ALLOC: u64 = 1000;

/// Precision multiplier for the per-share reward accumulator
pub const ACC_PRECISION: u128 = 1_000_000_000_000; // 10^12

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Maximum withdrawal fee (2% = 200 basis points)
pub const MAX_WITHDRAW_FEE_BPS: u16 = 200;

/// Maximum withdrawal fee window (72 hours)
pub const MAX_WITHDRAW_FEE_WINDOW: i64 = 72 * 60 * 60;

/// Share of every pool reward minted on top for the dev address (1/10)
pub const DEV_CUT_DIVISOR: u64 = 10;
