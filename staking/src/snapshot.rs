//! Quarterly eligibility snapshot
//!
//! Callable only at an unambiguous quarter boundary (first instant of
//! January, April, July or October, per `aura_core::calendar`). Stake age
//! for non-locked positions is judged against the modular 90-day window
//! `now - (now % 90 days)`, independent of calendar months.

use crate::error::{Result, StakingError};
use crate::events::StakingEvent;
use crate::ledger::StakeLedger;
use aura_core::constants::SECONDS_PER_QUARTER;
use aura_core::{calendar, COIN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Locked stakes qualify at this principal (100,000 AURA).
pub const LOCKED_ELIGIBILITY_MIN: u128 = 100_000 * COIN;

/// Non-locked stakes need five times as much principal, plus a stake
/// predating the current 90-day window.
pub const UNLOCKED_ELIGIBILITY_MIN: u128 = 500_000 * COIN;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotReport {
    pub taken_at: u64,
    pub taken_at_utc: DateTime<Utc>,
    pub total_stakers: u64,
    pub eligible_stakers: u64,
}

impl StakeLedger {
    /// Mark every active staker's quarterly eligibility flag.
    pub fn take_snapshot(&mut self, now: u64) -> Result<SnapshotReport> {
        if !calendar::is_quarter_start(now as i64) {
            return Err(StakingError::NotQuarterStart);
        }
        let window_start = now - (now % SECONDS_PER_QUARTER);

        let mut flags = HashMap::new();
        let mut eligible = 0u64;
        for (staker, stake) in self.stakes() {
            let qualifies = if stake.locked_up {
                stake.amount >= LOCKED_ELIGIBILITY_MIN
            } else {
                stake.amount >= UNLOCKED_ELIGIBILITY_MIN && stake.created_at <= window_start
            };
            if qualifies {
                eligible += 1;
            }
            flags.insert(staker.clone(), qualifies);
        }

        let total = self.total_active_stakers();
        self.set_eligibility(flags);
        self.push_event(StakingEvent::SnapshotTaken {
            at: now,
            eligible,
            total,
        });
        log::info!("Quarterly snapshot at {now}: {eligible}/{total} stakers eligible");

        Ok(SnapshotReport {
            taken_at: now,
            taken_at_utc: DateTime::from_timestamp(now as i64, 0).unwrap_or_default(),
            total_stakers: total,
            eligible_stakers: eligible,
        })
    }
}
