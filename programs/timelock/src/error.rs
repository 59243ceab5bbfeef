//! Error types for the timelock program.

use anchor_lang::prelude::*;

#[error_code]
pub enum TimelockError {
    /// [6000] Caller is not the timelock admin.
    #[msg("Call must come from admin")]
    NotAdmin,

    /// [6001] Caller is not the pending admin.
    #[msg("Call must come from pending admin")]
    NotPendingAdmin,

    /// [6002] Parameter change did not come through an executed transaction.
    #[msg("Call must come from the timelock itself")]
    NotExecutor,

    /// [6003] Delay is below the minimum.
    #[msg("Delay must exceed minimum delay")]
    DelayTooShort,

    /// [6004] Delay is above the maximum.
    #[msg("Delay must not exceed maximum delay")]
    DelayTooLong,

    /// [6005] ETA does not leave room for the configured delay.
    #[msg("Estimated execution block must satisfy delay")]
    EtaTooSoon,

    /// [6006] Execution attempted before the ETA.
    #[msg("Transaction hasn't surpassed time lock")]
    NotSurpassedTimelock,

    /// [6007] Execution attempted after the grace period.
    #[msg("Transaction is stale")]
    StaleTransaction,

    /// [6008] Queued transaction does not match the provided target.
    #[msg("Target program does not match the queued transaction")]
    TargetMismatch,
}
