//! Stake ledger
//!
//! Owns the active stakes, per-tier rosters, pending rewards and the
//! currently active case. Reward accrual is lazy: the current period is
//! re-derived from scratch (`principal * rate * elapsed_days`) at every
//! query, never summed onto, so asking twice at the same instant yields
//! the same value. Only a record replace freezes the derivation into the
//! stored scalar before the accrual clock restarts.

use crate::cases::{case, select_case};
use crate::error::{Result, StakingError};
use crate::events::StakingEvent;
use crate::roster::TierRoster;
use crate::tiers::{StakeTier, TIER_COUNT};
use aura_core::constants::{SECONDS_PER_DAY, UNSTAKE_BURN_PERCENT};
use aura_core::{math, Address, COIN};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Shortest accepted lock (90 days).
pub const MIN_LOCK_DURATION: u64 = 90 * SECONDS_PER_DAY;

/// Longest accepted lock (1095 days).
pub const MAX_LOCK_DURATION: u64 = 1_095 * SECONDS_PER_DAY;

/// One stake per staker; the record is deleted, never zeroed, when the
/// stake is fully closed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stake {
    pub amount: u128,
    pub created_at: u64,
    /// Amount-derived tier, frozen while the record exists
    pub tier: StakeTier,
    pub locked_up: bool,
    /// Lock window in seconds; 0 when not locked
    pub lock_duration: u64,
}

impl Stake {
    /// Yield row actually paid: non-locked stakes always earn at Flex.
    pub fn effective_tier(&self) -> StakeTier {
        if self.locked_up {
            self.tier
        } else {
            StakeTier::Flex
        }
    }

    pub fn unlock_at(&self) -> u64 {
        self.created_at + self.lock_duration
    }

    pub fn is_locked(&self, now: u64) -> bool {
        self.locked_up && now < self.unlock_at()
    }
}

/// Payout decomposition handed to the settlement layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnstakeOutcome {
    pub principal: u128,
    pub reward: u128,
    /// Burn share of principal + reward
    pub burned: u128,
    /// Amount actually paid to the staker
    pub net: u128,
    /// Whether the stake record was fully closed
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeLedger {
    stakes: HashMap<Address, Stake>,
    /// Reward frozen at the last record replace, carried until unstake
    frozen_rewards: HashMap<Address, u128>,
    rosters: [TierRoster; TIER_COUNT],
    eligibility: HashMap<Address, bool>,
    allowlist: HashSet<Address>,
    staking_enabled: bool,
    active_case: usize,
    events: Vec<StakingEvent>,
}

impl Default for StakeLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl StakeLedger {
    pub fn new() -> Self {
        StakeLedger {
            stakes: HashMap::new(),
            frozen_rewards: HashMap::new(),
            rosters: Default::default(),
            eligibility: HashMap::new(),
            allowlist: HashSet::new(),
            staking_enabled: false,
            active_case: 0,
            events: Vec::new(),
        }
    }

    // --- gating -----------------------------------------------------------

    pub fn set_staking_enabled(&mut self, enabled: bool) {
        self.staking_enabled = enabled;
    }

    pub fn staking_enabled(&self) -> bool {
        self.staking_enabled
    }

    pub fn allowlist_add(&mut self, address: &str) {
        self.allowlist.insert(address.to_string());
    }

    pub fn allowlist_remove(&mut self, address: &str) {
        self.allowlist.remove(address);
    }

    pub fn is_allowlisted(&self, address: &str) -> bool {
        self.allowlist.contains(address)
    }

    /// Staking is open to a caller when globally enabled, or the caller is
    /// allow-listed, or the caller holds an active vesting schedule (the
    /// dispatcher passes that check in as a pre-validated boolean).
    fn check_gate(&self, staker: &str, has_active_vesting: bool) -> Result<()> {
        if self.staking_enabled || has_active_vesting || self.is_allowlisted(staker) {
            Ok(())
        } else {
            Err(StakingError::StakingDisabled)
        }
    }

    // --- queries ----------------------------------------------------------

    pub fn get_stake(&self, staker: &str) -> Option<&Stake> {
        self.stakes.get(staker)
    }

    pub fn total_active_stakers(&self) -> u64 {
        self.stakes.len() as u64
    }

    pub fn active_case(&self) -> usize {
        self.active_case
    }

    pub fn roster_len(&self, tier: StakeTier) -> u64 {
        self.rosters[tier.index()].len()
    }

    pub fn roster_page(&self, tier: StakeTier, offset: usize, limit: usize) -> Vec<Address> {
        self.rosters[tier.index()].page(offset, limit)
    }

    pub fn is_eligible(&self, staker: &str) -> bool {
        self.eligibility.get(staker).copied().unwrap_or(false)
    }

    pub(crate) fn stakes(&self) -> &HashMap<Address, Stake> {
        &self.stakes
    }

    pub(crate) fn set_eligibility(&mut self, flags: HashMap<Address, bool>) {
        self.eligibility = flags;
    }

    pub(crate) fn push_event(&mut self, event: StakingEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<StakingEvent> {
        std::mem::take(&mut self.events)
    }

    /// Total unclaimed reward as of `now`: the frozen carry plus the
    /// current period re-derived from the accrual clock. Pure.
    pub fn pending_reward(&self, staker: &str, now: u64) -> Result<u128> {
        let stake = self
            .stakes
            .get(staker)
            .ok_or_else(|| StakingError::NoActiveStake(staker.to_string()))?;
        let frozen = self.frozen_rewards.get(staker).copied().unwrap_or(0);
        math::add(frozen, self.derive_reward(stake, now)?).map_err(Into::into)
    }

    /// Current-period derivation: `principal * rate * elapsed_days`.
    fn derive_reward(&self, stake: &Stake, now: u64) -> Result<u128> {
        let elapsed_days = now.saturating_sub(stake.created_at) / SECONDS_PER_DAY;
        if elapsed_days == 0 {
            return Ok(0);
        }
        // The *currently active* case applies to the whole elapsed span,
        // not the case active when the stake was created.
        let rate = case(self.active_case).daily_yield[stake.effective_tier().index()];
        let rate_days = rate
            .checked_mul(elapsed_days as u128)
            .ok_or(aura_core::MathError::Overflow)?;
        Ok(math::mul_div(stake.amount, rate_days, COIN)?)
    }

    // --- rosters and case selection --------------------------------------

    /// Cap check runs against the case the population will be under once
    /// the newcomer counts, so growth across a case boundary is governed by
    /// the schedule it lands in.
    fn roster_insert(&mut self, staker: &str, tier: StakeTier, population: u64) -> Result<()> {
        let governing = select_case(population);
        let cap = case(governing).tier_wallet_caps[tier.index()];
        let roster = &mut self.rosters[tier.index()];
        if roster.len() >= cap {
            return Err(StakingError::TierCapacityReached {
                tier: tier.name(),
                cap,
            });
        }
        roster.insert(staker);
        Ok(())
    }

    fn roster_move(&mut self, staker: &str, from: StakeTier, to: StakeTier) -> Result<()> {
        if from == to {
            return Ok(());
        }
        self.roster_insert(staker, to, self.total_active_stakers())?;
        self.rosters[from.index()].remove(staker);
        Ok(())
    }

    /// Recompute the active case from the staker population; persisted and
    /// announced only when the selection changes.
    fn recompute_case(&mut self) {
        let total = self.total_active_stakers();
        let selected = select_case(total);
        if selected != self.active_case {
            log::info!(
                "Reward case changed {} -> {} at {} active stakers",
                self.active_case,
                selected,
                total
            );
            self.events.push(StakingEvent::CaseChanged {
                from: self.active_case,
                to: selected,
                total_stakers: total,
            });
            self.active_case = selected;
        }
    }

    // --- operations -------------------------------------------------------

    /// Open a stake, or fold more principal into an existing one.
    ///
    /// An existing stake is fully replaced (combined amount, refreshed
    /// timestamp and lock parameters) except that the amount-derived tier
    /// stays frozen. The reward earned up to the replace is frozen aside
    /// for the eventual unstake, never folded into principal.
    pub fn stake(
        &mut self,
        staker: &str,
        amount: u128,
        locked_up: bool,
        lock_duration: u64,
        has_active_vesting: bool,
        now: u64,
    ) -> Result<()> {
        self.check_gate(staker, has_active_vesting)?;
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        if locked_up && !(MIN_LOCK_DURATION..=MAX_LOCK_DURATION).contains(&lock_duration) {
            return Err(StakingError::InvalidLockDuration {
                duration: lock_duration,
                min: MIN_LOCK_DURATION,
                max: MAX_LOCK_DURATION,
            });
        }
        let lock_duration = if locked_up { lock_duration } else { 0 };

        match self.stakes.get(staker).cloned() {
            None => {
                let tier = StakeTier::from_amount(amount)?;
                let record = Stake {
                    amount,
                    created_at: now,
                    tier,
                    locked_up,
                    lock_duration,
                };
                self.roster_insert(
                    staker,
                    record.effective_tier(),
                    self.total_active_stakers() + 1,
                )?;
                self.stakes.insert(staker.to_string(), record);
                self.frozen_rewards.insert(staker.to_string(), 0);
                self.events.push(StakingEvent::Staked {
                    staker: staker.to_string(),
                    delta: amount,
                    total: amount,
                });
            }
            Some(existing) => {
                let combined = math::add(existing.amount, amount)?;
                // Freeze the reward earned so far; the replace below
                // restarts the accrual clock.
                let frozen = self.pending_reward(staker, now)?;
                let record = Stake {
                    amount: combined,
                    created_at: now,
                    tier: existing.tier,
                    locked_up,
                    lock_duration,
                };
                self.roster_move(staker, existing.effective_tier(), record.effective_tier())?;
                self.stakes.insert(staker.to_string(), record);
                self.frozen_rewards.insert(staker.to_string(), frozen);
                self.events.push(StakingEvent::Staked {
                    staker: staker.to_string(),
                    delta: amount,
                    total: combined,
                });
            }
        }

        self.recompute_case();
        Ok(())
    }

    /// Validate an unstake and compute its payout without mutating.
    pub fn preview_unstake(
        &self,
        staker: &str,
        amount: u128,
        has_active_vesting: bool,
        now: u64,
    ) -> Result<UnstakeOutcome> {
        self.check_gate(staker, has_active_vesting)?;
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        let stake = self
            .stakes
            .get(staker)
            .ok_or_else(|| StakingError::NoActiveStake(staker.to_string()))?;
        if amount > stake.amount {
            return Err(StakingError::InsufficientStake {
                requested: amount,
                staked: stake.amount,
            });
        }
        if stake.is_locked(now) {
            return Err(StakingError::TokensStillLocked {
                unlock_at: stake.unlock_at(),
            });
        }

        let reward = self.pending_reward(staker, now)?;
        let payout = math::add(amount, reward)?;
        let burned = math::percent(payout, UNSTAKE_BURN_PERCENT)?;
        Ok(UnstakeOutcome {
            principal: amount,
            reward,
            burned,
            net: payout - burned,
            closed: amount == stake.amount,
        })
    }

    /// Close part or all of a stake. The full pending reward rides along
    /// with every unstake; a zero remainder deletes the stake and reward
    /// records and vacates the roster slot.
    pub fn unstake(
        &mut self,
        staker: &str,
        amount: u128,
        has_active_vesting: bool,
        now: u64,
    ) -> Result<UnstakeOutcome> {
        let outcome = self.preview_unstake(staker, amount, has_active_vesting, now)?;

        if outcome.closed {
            let stake = self.stakes.remove(staker).expect("previewed stake exists");
            self.frozen_rewards.remove(staker);
            self.rosters[stake.effective_tier().index()].remove(staker);
            self.eligibility.remove(staker);
        } else {
            let stake = self.stakes.get_mut(staker).expect("previewed stake exists");
            stake.amount -= amount;
            // The paid-out reward must not re-derive: restart the accrual
            // clock. A lock that reached this point has already been
            // served, so the remainder continues as a Flex position.
            stake.created_at = now;
            let was = stake.effective_tier();
            if stake.locked_up {
                stake.locked_up = false;
                stake.lock_duration = 0;
            }
            let is = stake.effective_tier();
            if was != is {
                self.rosters[was.index()].remove(staker);
                // Vacating a lock row never strands the staker: the Flex
                // slot is taken unconditionally.
                self.rosters[is.index()].insert(staker);
            }
            self.frozen_rewards.insert(staker.to_string(), 0);
        }

        self.events.push(StakingEvent::Unstaked {
            staker: staker.to_string(),
            principal: outcome.principal,
            reward: outcome.reward,
            burned: outcome.burned,
            closed: outcome.closed,
        });
        self.recompute_case();
        Ok(outcome)
    }

    /// Additive top-up onto an existing stake: principal grows and the lock
    /// restarts at `now` with the given duration. Distinct from `stake`:
    /// the tier is not reclassified and the pending reward is neither paid
    /// out nor frozen here, so the current accrual period restarts unpaid.
    pub fn lock_tokens(
        &mut self,
        staker: &str,
        amount: u128,
        duration: u64,
        now: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        if !(MIN_LOCK_DURATION..=MAX_LOCK_DURATION).contains(&duration) {
            return Err(StakingError::InvalidLockDuration {
                duration,
                min: MIN_LOCK_DURATION,
                max: MAX_LOCK_DURATION,
            });
        }
        let existing = self
            .stakes
            .get(staker)
            .cloned()
            .ok_or_else(|| StakingError::NoActiveStake(staker.to_string()))?;

        let combined = math::add(existing.amount, amount)?;
        let record = Stake {
            amount: combined,
            created_at: now,
            tier: existing.tier,
            locked_up: true,
            lock_duration: duration,
        };
        self.roster_move(staker, existing.effective_tier(), record.effective_tier())?;
        let unlock_at = record.unlock_at();
        self.stakes.insert(staker.to_string(), record);
        self.events.push(StakingEvent::Locked {
            staker: staker.to_string(),
            added: amount,
            unlock_at,
        });
        Ok(())
    }
}
