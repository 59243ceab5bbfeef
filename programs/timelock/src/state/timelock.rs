//! Timelock state and scheduling rules.
//!
//! Queued transactions are keyed by the hash of (target program, instruction
//! data, ETA), so re-queueing the identical action at the same ETA lands on
//! the same address. Scheduling checks are pure functions over timestamps.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;
use anchor_lang::solana_program::instruction::AccountMeta;

use crate::constants::*;
use crate::error::TimelockError;

#[account]
pub struct Timelock {
    /// May queue, cancel and execute transactions.
    pub admin: Pubkey,
    /// Set through an executed transaction; claims the role via accept_admin.
    pub pending_admin: Pubkey,
    /// Seconds between queueing and the earliest valid execution.
    pub delay: i64,
    pub bump: u8,
    pub executor_bump: u8,
}

impl Timelock {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 1 + 1;

    /// Delay must sit inside the configured band.
    pub fn validate_delay(delay: i64) -> Result<()> {
        require!(delay >= MINIMUM_DELAY, TimelockError::DelayTooShort);
        require!(delay <= MAXIMUM_DELAY, TimelockError::DelayTooLong);
        Ok(())
    }

    /// An ETA must leave at least `delay` seconds from `now`.
    pub fn validate_eta(&self, eta: i64, now: i64) -> Result<()> {
        require!(
            eta >= now.saturating_add(self.delay),
            TimelockError::EtaTooSoon
        );
        Ok(())
    }

    /// Execution is valid in the window `[eta, eta + GRACE_PERIOD]`.
    pub fn validate_execution(eta: i64, now: i64) -> Result<()> {
        require!(now >= eta, TimelockError::NotSurpassedTimelock);
        require!(
            now <= eta.saturating_add(GRACE_PERIOD),
            TimelockError::StaleTransaction
        );
        Ok(())
    }
}

/// Serialized account meta for a queued instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct TransactionAccount {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl TransactionAccount {
    pub const LEN: usize = 32 + 1 + 1;
}

impl From<&TransactionAccount> for AccountMeta {
    fn from(account: &TransactionAccount) -> Self {
        AccountMeta {
            pubkey: account.pubkey,
            is_signer: account.is_signer,
            is_writable: account.is_writable,
        }
    }
}

/// A transaction waiting out its delay.
#[account]
pub struct QueuedTransaction {
    pub timelock: Pubkey,
    pub target_program: Pubkey,
    pub accounts: Vec<TransactionAccount>,
    pub data: Vec<u8>,
    /// Earliest timestamp at which execution becomes valid.
    pub eta: i64,
    pub bump: u8,
}

impl QueuedTransaction {
    pub fn space(accounts: usize, data_len: usize) -> usize {
        8 + 32 + 32 + (4 + accounts * TransactionAccount::LEN) + (4 + data_len) + 8 + 1
    }

    /// Address key: identical (target, data, eta) triples collide on purpose.
    pub fn tx_hash(target_program: &Pubkey, data: &[u8], eta: i64) -> [u8; 32] {
        hashv(&[target_program.as_ref(), data, &eta.to_le_bytes()]).to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timelock(delay: i64) -> Timelock {
        Timelock {
            admin: Pubkey::default(),
            pending_admin: Pubkey::default(),
            delay,
            bump: 0,
            executor_bump: 0,
        }
    }

    #[test]
    fn delay_band_is_enforced() {
        assert!(Timelock::validate_delay(MINIMUM_DELAY - 1).is_err());
        assert!(Timelock::validate_delay(MINIMUM_DELAY).is_ok());
        assert!(Timelock::validate_delay(MAXIMUM_DELAY).is_ok());
        assert!(Timelock::validate_delay(MAXIMUM_DELAY + 1).is_err());
    }

    #[test]
    fn eta_must_clear_the_delay() {
        let lock = timelock(MINIMUM_DELAY);
        let now = 1_700_000_000;
        assert!(lock.validate_eta(now + MINIMUM_DELAY - 1, now).is_err());
        assert!(lock.validate_eta(now + MINIMUM_DELAY, now).is_ok());
        assert!(lock.validate_eta(now + MAXIMUM_DELAY, now).is_ok());
    }

    #[test]
    fn execution_window_opens_at_eta_and_closes_after_grace() {
        let eta = 1_700_000_000;
        assert!(Timelock::validate_execution(eta, eta - 1).is_err());
        assert!(Timelock::validate_execution(eta, eta).is_ok());
        assert!(Timelock::validate_execution(eta, eta + GRACE_PERIOD).is_ok());
        assert!(Timelock::validate_execution(eta, eta + GRACE_PERIOD + 1).is_err());
    }

    #[test]
    fn identical_actions_at_the_same_eta_share_a_hash() {
        let target = Pubkey::new_unique();
        let a = QueuedTransaction::tx_hash(&target, &[1, 2, 3], 42);
        let b = QueuedTransaction::tx_hash(&target, &[1, 2, 3], 42);
        let c = QueuedTransaction::tx_hash(&target, &[1, 2, 3], 43);
        let d = QueuedTransaction::tx_hash(&target, &[1, 2, 4], 42);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
