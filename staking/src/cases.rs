//! Population-keyed reward cases
//!
//! Four fixed reward schedules trade yield against supported staker
//! population: as the number of active stakers grows past each ceiling,
//! the economy moves to a lower-yield case so aggregate daily payout
//! stays bounded. Yields are 10^18-scaled fractions of principal per
//! elapsed day; row 0 is the Flex (non-locked) rate.

use crate::tiers::TIER_COUNT;
use serde::{Deserialize, Serialize};

pub const CASE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseConfig {
    /// Active-staker population ceiling for this case
    pub max_wallets: u64,
    /// Daily yield per tier row, 10^18-scaled fraction of principal
    pub daily_yield: [u128; TIER_COUNT],
    /// Wallet cap per tier row while this case is active
    pub tier_wallet_caps: [u64; TIER_COUNT],
}

/// The four cases, ascending population ceiling, descending yield.
pub const CASES: [CaseConfig; CASE_COUNT] = [
    // Case 0: up to 1,500 stakers, richest schedule
    CaseConfig {
        max_wallets: 1_500,
        daily_yield: [
            500_000_000_000_000,   // Flex      0.05% / day
            3_000_000_000_000_000, // Bronze    0.30% / day
            3_500_000_000_000_000, // Silver    0.35% / day
            4_000_000_000_000_000, // Gold      0.40% / day
            4_500_000_000_000_000, // Platinum  0.45% / day
            5_000_000_000_000_000, // Sapphire  0.50% / day
            6_000_000_000_000_000, // Diamond   0.60% / day
        ],
        tier_wallet_caps: [1_500, 400, 180, 100, 45, 20, 5],
    },
    // Case 1: up to 3,000 stakers
    CaseConfig {
        max_wallets: 3_000,
        daily_yield: [
            400_000_000_000_000,   // Flex      0.04% / day
            2_400_000_000_000_000, // Bronze    0.24% / day
            2_800_000_000_000_000, // Silver    0.28% / day
            3_200_000_000_000_000, // Gold      0.32% / day
            3_600_000_000_000_000, // Platinum  0.36% / day
            4_000_000_000_000_000, // Sapphire  0.40% / day
            4_800_000_000_000_000, // Diamond   0.48% / day
        ],
        tier_wallet_caps: [3_000, 800, 360, 200, 90, 40, 10],
    },
    // Case 2: up to 10,000 stakers
    CaseConfig {
        max_wallets: 10_000,
        daily_yield: [
            300_000_000_000_000,   // Flex      0.03% / day
            1_800_000_000_000_000, // Bronze    0.18% / day
            2_100_000_000_000_000, // Silver    0.21% / day
            2_400_000_000_000_000, // Gold      0.24% / day
            2_700_000_000_000_000, // Platinum  0.27% / day
            3_000_000_000_000_000, // Sapphire  0.30% / day
            3_600_000_000_000_000, // Diamond   0.36% / day
        ],
        tier_wallet_caps: [10_000, 2_600, 1_200, 700, 350, 120, 30],
    },
    // Case 3: 20,000 ceiling and the fallback above it, leanest schedule
    CaseConfig {
        max_wallets: 20_000,
        daily_yield: [
            200_000_000_000_000,   // Flex      0.02% / day
            1_200_000_000_000_000, // Bronze    0.12% / day
            1_400_000_000_000_000, // Silver    0.14% / day
            1_600_000_000_000_000, // Gold      0.16% / day
            1_800_000_000_000_000, // Platinum  0.18% / day
            2_000_000_000_000_000, // Sapphire  0.20% / day
            2_400_000_000_000_000, // Diamond   0.24% / day
        ],
        tier_wallet_caps: [20_000, 5_200, 2_400, 1_400, 700, 240, 60],
    },
];

/// First case whose ceiling covers the population; the last case is the
/// fallback when every ceiling is exceeded.
pub fn select_case(total_active_stakers: u64) -> usize {
    CASES
        .iter()
        .position(|case| total_active_stakers <= case.max_wallets)
        .unwrap_or(CASE_COUNT - 1)
}

pub fn case(index: usize) -> &'static CaseConfig {
    &CASES[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_case_thresholds() {
        assert_eq!(select_case(0), 0);
        assert_eq!(select_case(1_500), 0);
        assert_eq!(select_case(1_501), 1);
        assert_eq!(select_case(3_000), 1);
        assert_eq!(select_case(10_000), 2);
        assert_eq!(select_case(20_000), 3);
        // Past every ceiling the last case still applies
        assert_eq!(select_case(20_001), 3);
        assert_eq!(select_case(u64::MAX), 3);
    }

    #[test]
    fn test_cases_ordered() {
        for pair in CASES.windows(2) {
            assert!(pair[0].max_wallets < pair[1].max_wallets);
            for row in 0..TIER_COUNT {
                // Yield strictly decreases as population grows
                assert!(pair[0].daily_yield[row] > pair[1].daily_yield[row]);
            }
        }
    }

    #[test]
    fn test_yield_rises_with_tier() {
        for config in &CASES {
            for row in 1..TIER_COUNT - 1 {
                assert!(config.daily_yield[row] < config.daily_yield[row + 1]);
            }
            // Flex is the leanest row of its case
            assert!(config.daily_yield[0] < config.daily_yield[1]);
        }
    }
}
