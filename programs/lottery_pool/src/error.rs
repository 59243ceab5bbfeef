//! Error types for the lottery pool program.

use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    /// [6000] Caller is not the lottery admin.
    #[msg("admin: wut?")]
    NotAdmin,

    /// [6001] Caller is not the lottery owner.
    #[msg("Unauthorized: caller is not the lottery owner")]
    Unauthorized,

    /// [6002] Fee exceeds 100%.
    #[msg("Admin fee exceeds the basis-point denominator")]
    FeeTooLarge,

    /// [6003] Arithmetic overflow during fee calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6004] A token account does not belong to the expected owner or mint.
    #[msg("Token account mismatch")]
    AccountMismatch,
}
