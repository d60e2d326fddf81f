//! Per-tier staker rosters
//!
//! Index-addressable member list plus a reverse-lookup map, so removal is
//! O(1) via swap-with-last-and-pop. Iteration order is an artifact of the
//! removal pattern and carries no meaning; callers get pagination, never
//! ordering guarantees.

use aura_core::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierRoster {
    members: Vec<Address>,
    positions: HashMap<Address, usize>,
}

impl TierRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> u64 {
        self.members.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.positions.contains_key(address)
    }

    /// Add a member; no-op if already present.
    pub fn insert(&mut self, address: &str) {
        if self.positions.contains_key(address) {
            return;
        }
        self.positions
            .insert(address.to_string(), self.members.len());
        self.members.push(address.to_string());
    }

    /// Swap-with-last-and-pop removal. Returns whether the member existed.
    pub fn remove(&mut self, address: &str) -> bool {
        let Some(position) = self.positions.remove(address) else {
            return false;
        };
        let last = self.members.len() - 1;
        self.members.swap(position, last);
        self.members.pop();
        if position < last {
            let moved = self.members[position].clone();
            self.positions.insert(moved, position);
        }
        true
    }

    /// Page of members starting at `offset`, at most `limit` entries.
    pub fn page(&self, offset: usize, limit: usize) -> Vec<Address> {
        self.members
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }
}
