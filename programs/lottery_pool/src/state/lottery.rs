//! Lottery pool state.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;

/// Farms lottery funds through the master farm. The PDA is the depositor of
/// record; harvested reward is forwarded to `receiver` minus an optional
/// admin cut.
#[account]
pub struct LotteryPool {
    /// Owner: may replace the admin.
    pub authority: Pubkey,
    /// Operator: farms, harvests, and retargets the receiver.
    pub admin: Pubkey,
    /// Destination of the forwarded harvest.
    pub receiver: Pubkey,
    /// The master farm this pool stakes into.
    pub farm: Pubkey,
    /// Cut of every harvest kept for the admin, in basis points.
    pub admin_fee_bps: u16,
    pub bump: u8,
}

impl LotteryPool {
    pub const LEN: usize = 8 + (32 * 4) + 2 + 1;

    /// Splits a harvest into (admin fee, forwarded remainder).
    pub fn split_harvest(&self, amount: u64) -> Result<(u64, u64)> {
        let fee = (amount as u128)
            .checked_mul(self.admin_fee_bps as u128)
            .ok_or(LotteryError::MathOverflow)?
            / BASIS_POINTS_DENOMINATOR as u128;
        let fee = u64::try_from(fee).map_err(|_| LotteryError::MathOverflow)?;
        Ok((fee, amount - fee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lottery(admin_fee_bps: u16) -> LotteryPool {
        LotteryPool {
            authority: Pubkey::default(),
            admin: Pubkey::default(),
            receiver: Pubkey::default(),
            farm: Pubkey::default(),
            admin_fee_bps,
            bump: 0,
        }
    }

    #[test]
    fn zero_fee_forwards_the_whole_harvest() {
        assert_eq!(lottery(0).split_harvest(1_000_000).unwrap(), (0, 1_000_000));
    }

    #[test]
    fn fee_rounds_down_in_the_receiver_favor() {
        // 2.5% of 999 = 24.975 -> 24
        assert_eq!(lottery(250).split_harvest(999).unwrap(), (24, 975));
        assert_eq!(lottery(250).split_harvest(0).unwrap(), (0, 0));
    }

    #[test]
    fn full_fee_keeps_everything() {
        assert_eq!(lottery(10_000).split_harvest(777).unwrap(), (777, 0));
    }
}
