//! Program constants for the timelock.

/// Seed for deriving the timelock PDA
pub const TIMELOCK_SEED: &[u8] = b"timelock";

/// Seed for deriving the executor PDA that signs executed transactions
pub const EXECUTOR_SEED: &[u8] = b"executor";

/// Seed for deriving queued transaction PDAs
pub const TRANSACTION_SEED: &[u8] = b"transaction";

/// Shortest configurable execution delay (6 hours)
pub const MINIMUM_DELAY: i64 = 6 * 60 * 60;

/// Longest configurable execution delay (30 days)
pub const MAXIMUM_DELAY: i64 = 30 * 24 * 60 * 60;

/// Window after the ETA during which execution stays valid (14 days)
pub const GRACE_PERIOD: i64 = 14 * 24 * 60 * 60;
