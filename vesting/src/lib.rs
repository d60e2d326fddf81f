//! AURA Coin Vesting Module
//!
//! Time-locked allocations with linear release: each account carries an
//! append-only list of schedules (marketing 120 days, team 90 days),
//! released independently and gating outbound transfers while active and
//! unexpired.

pub mod error;
pub mod ledger;
pub mod schedule;

pub use error::{Result, VestingError};
pub use ledger::VestingLedger;
pub use schedule::{VestingSchedule, VestingType};
