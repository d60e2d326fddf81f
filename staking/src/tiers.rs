//! Stake tiers and principal classification

use crate::error::{Result, StakingError};
use aura_core::COIN;
use serde::{Deserialize, Serialize};

/// Number of tier rows (Flex plus six principal brackets).
pub const TIER_COUNT: usize = 7;

/// Minimum principal accepted by the classifier (10,000 AURA).
pub const MIN_STAKE: u128 = 10_000 * COIN;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StakeTier {
    /// Non-locked stakes always earn at this row regardless of principal
    Flex,
    Bronze,   // 10,000 AURA
    Silver,   // 50,000 AURA
    Gold,     // 100,000 AURA
    Platinum, // 500,000 AURA
    Sapphire, // 1,000,000 AURA
    Diamond,  // 5,000,000 AURA
}

impl StakeTier {
    /// Classify a principal amount into Bronze..Diamond.
    ///
    /// Flex is never assigned from an amount; it is the yield row applied
    /// to stakes without a lock.
    pub fn from_amount(amount: u128) -> Result<Self> {
        if amount < MIN_STAKE {
            return Err(StakingError::BelowMinimumStake { minimum: MIN_STAKE });
        }
        let tier = match amount {
            x if x < 50_000 * COIN => StakeTier::Bronze,
            x if x < 100_000 * COIN => StakeTier::Silver,
            x if x < 500_000 * COIN => StakeTier::Gold,
            x if x < 1_000_000 * COIN => StakeTier::Platinum,
            x if x < 5_000_000 * COIN => StakeTier::Sapphire,
            _ => StakeTier::Diamond,
        };
        Ok(tier)
    }

    /// Row index into the per-case yield and cap tables.
    pub fn index(&self) -> usize {
        match self {
            StakeTier::Flex => 0,
            StakeTier::Bronze => 1,
            StakeTier::Silver => 2,
            StakeTier::Gold => 3,
            StakeTier::Platinum => 4,
            StakeTier::Sapphire => 5,
            StakeTier::Diamond => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(StakeTier::Flex),
            1 => Some(StakeTier::Bronze),
            2 => Some(StakeTier::Silver),
            3 => Some(StakeTier::Gold),
            4 => Some(StakeTier::Platinum),
            5 => Some(StakeTier::Sapphire),
            6 => Some(StakeTier::Diamond),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StakeTier::Flex => "Flex",
            StakeTier::Bronze => "Bronze",
            StakeTier::Silver => "Silver",
            StakeTier::Gold => "Gold",
            StakeTier::Platinum => "Platinum",
            StakeTier::Sapphire => "Sapphire",
            StakeTier::Diamond => "Diamond",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_minimum_rejected() {
        let result = StakeTier::from_amount(MIN_STAKE - 1);
        assert_eq!(
            result,
            Err(StakingError::BelowMinimumStake { minimum: MIN_STAKE })
        );
        assert_eq!(StakeTier::from_amount(0), result);
    }

    #[test]
    fn test_tier_from_amount() {
        assert_eq!(
            StakeTier::from_amount(10_000 * COIN).unwrap(),
            StakeTier::Bronze
        );
        assert_eq!(
            StakeTier::from_amount(50_000 * COIN).unwrap(),
            StakeTier::Silver
        );
        assert_eq!(
            StakeTier::from_amount(99_999 * COIN).unwrap(),
            StakeTier::Silver
        );
        assert_eq!(
            StakeTier::from_amount(500_000 * COIN).unwrap(),
            StakeTier::Platinum
        );
        assert_eq!(
            StakeTier::from_amount(123_456_789 * COIN).unwrap(),
            StakeTier::Diamond
        );
    }

    #[test]
    fn test_classification_monotone() {
        let mut last = 0;
        let mut amount = MIN_STAKE;
        while amount < 10_000_000 * COIN {
            let index = StakeTier::from_amount(amount).unwrap().index();
            assert!(index >= last, "tier dropped at {amount}");
            last = index;
            amount += 7_777 * COIN;
        }
    }

    #[test]
    fn test_index_roundtrip() {
        for i in 0..TIER_COUNT {
            assert_eq!(StakeTier::from_index(i).unwrap().index(), i);
        }
        assert!(StakeTier::from_index(TIER_COUNT).is_none());
    }
}
