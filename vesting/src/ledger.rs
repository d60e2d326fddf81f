//! Vesting ledger
//!
//! Append-only list of schedules per account: a new grant never clobbers
//! an earlier one, and each schedule releases independently. Granted
//! amounts live in the vesting reserve until released; the settlement
//! layer credits releases to the account's transferable balance.

use crate::error::{Result, VestingError};
use crate::schedule::{VestingSchedule, VestingType};
use aura_core::constants::MAX_SUPPLY;
use aura_core::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VestingLedger {
    schedules: HashMap<Address, Vec<VestingSchedule>>,
}

impl VestingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new schedule for the account, running from `now` for the
    /// duration the vesting type prescribes.
    pub fn add_schedule(
        &mut self,
        account: &str,
        amount: u128,
        vesting_type: VestingType,
        now: u64,
    ) -> Result<()> {
        if account.is_empty() {
            return Err(VestingError::InvalidAddress);
        }
        if amount == 0 {
            return Err(VestingError::ZeroAmount);
        }
        if amount > MAX_SUPPLY {
            return Err(VestingError::AmountExceedsCap { cap: MAX_SUPPLY });
        }
        self.schedules
            .entry(account.to_string())
            .or_default()
            .push(VestingSchedule::new(amount, vesting_type, now));
        Ok(())
    }

    pub fn schedules(&self, account: &str) -> &[VestingSchedule] {
        self.schedules.get(account).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vested-but-unreleased balance across all of the account's active
    /// schedules. Pure.
    pub fn vested_amount(&self, account: &str, now: u64) -> u128 {
        self.schedules(account)
            .iter()
            .map(|s| s.vested_amount(now))
            .sum()
    }

    /// Whether the account holds any active schedule (used by the staking
    /// gate bypass).
    pub fn has_active_schedule(&self, account: &str) -> bool {
        self.schedules(account).iter().any(|s| s.active)
    }

    /// Whether outbound transfers from the account are currently gated.
    pub fn has_transfer_lock(&self, account: &str, now: u64) -> bool {
        self.schedules(account)
            .iter()
            .any(|s| s.locks_transfers(now))
    }

    /// Release everything currently vested across the account's
    /// schedules; returns the total for the settlement layer to credit.
    pub fn release(&mut self, account: &str, now: u64) -> Result<u128> {
        let Some(schedules) = self.schedules.get_mut(account) else {
            return Err(VestingError::VestingNotActive(account.to_string()));
        };
        if !schedules.iter().any(|s| s.active) {
            return Err(VestingError::VestingNotActive(account.to_string()));
        }
        if schedules.iter().map(|s| s.vested_amount(now)).sum::<u128>() == 0 {
            return Err(VestingError::NoTokensToRelease);
        }

        let mut released = 0u128;
        for schedule in schedules.iter_mut() {
            released += schedule.release(now);
        }
        Ok(released)
    }
}
