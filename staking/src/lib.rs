//! AURA Coin Staking Module
//!
//! Tier-classified staking with population-keyed reward cases:
//! - Seven yield rows: Flex for non-locked stakes plus six principal
//!   brackets assigned at stake creation
//! - Four reward cases that lower daily yield as the active-staker
//!   population grows
//! - Lazy, re-derived daily reward accrual
//! - Quarterly eligibility snapshots gated on calendar quarter starts

pub mod cases;
pub mod error;
pub mod events;
pub mod ledger;
pub mod roster;
pub mod snapshot;
pub mod tiers;

pub use cases::{case, select_case, CaseConfig, CASES, CASE_COUNT};
pub use error::{Result, StakingError};
pub use events::StakingEvent;
pub use ledger::{
    Stake, StakeLedger, UnstakeOutcome, MAX_LOCK_DURATION, MIN_LOCK_DURATION,
};
pub use roster::TierRoster;
pub use snapshot::{SnapshotReport, LOCKED_ELIGIBILITY_MIN, UNLOCKED_ELIGIBILITY_MIN};
pub use tiers::{StakeTier, MIN_STAKE, TIER_COUNT};
