//! Vesting schedules and linear release math

use crate::error::{Result, VestingError};
use aura_core::constants::SECONDS_PER_DAY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VestingType {
    /// Marketing allocation, 120-day schedule
    Marketing,
    /// Team allocation, 90-day schedule
    Team,
}

impl VestingType {
    /// Decode the wire code (0 = marketing, 1 = team).
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(VestingType::Marketing),
            1 => Ok(VestingType::Team),
            other => Err(VestingError::InvalidVestingType(other)),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            VestingType::Marketing => 0,
            VestingType::Team => 1,
        }
    }

    pub fn duration(&self) -> u64 {
        match self {
            VestingType::Marketing => 120 * SECONDS_PER_DAY,
            VestingType::Team => 90 * SECONDS_PER_DAY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VestingSchedule {
    pub start: u64,
    pub end: u64,
    pub total_amount: u128,
    pub released_amount: u128,
    pub active: bool,
    pub vesting_type: VestingType,
}

impl VestingSchedule {
    pub fn new(amount: u128, vesting_type: VestingType, now: u64) -> Self {
        VestingSchedule {
            start: now,
            end: now + vesting_type.duration(),
            total_amount: amount,
            released_amount: 0,
            active: true,
            vesting_type,
        }
    }

    /// Vested-but-unreleased balance at `now`. Pure; linear interpolation
    /// with floor division between start and end.
    pub fn vested_amount(&self, now: u64) -> u128 {
        if !self.active || now < self.start {
            return 0;
        }
        if now >= self.end {
            return self.total_amount - self.released_amount;
        }
        let elapsed = (now - self.start) as u128;
        let span = (self.end - self.start) as u128;
        let linear = self.total_amount * elapsed / span;
        linear.saturating_sub(self.released_amount)
    }

    /// Move the currently vested amount into `released_amount`; the
    /// schedule deactivates exactly when everything is released.
    pub fn release(&mut self, now: u64) -> u128 {
        let amount = self.vested_amount(now);
        self.released_amount += amount;
        if self.released_amount >= self.total_amount {
            self.active = false;
        }
        amount
    }

    /// Outbound transfers are gated while the schedule is active and
    /// unexpired.
    pub fn locks_transfers(&self, now: u64) -> bool {
        self.active && now < self.end
    }
}
