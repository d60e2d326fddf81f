//! Staking domain events

use aura_core::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StakingEvent {
    Staked {
        staker: Address,
        delta: u128,
        total: u128,
    },
    Unstaked {
        staker: Address,
        principal: u128,
        reward: u128,
        burned: u128,
        closed: bool,
    },
    Locked {
        staker: Address,
        added: u128,
        unlock_at: u64,
    },
    CaseChanged {
        from: usize,
        to: usize,
        total_stakers: u64,
    },
    SnapshotTaken {
        at: u64,
        eligible: u64,
        total: u64,
    },
}
