//! Token economy facade
//!
//! Single dispatch point for every caller-facing operation. Each
//! operation runs in three strict phases: validate every precondition
//! (including the feasibility of the outbound token movements), commit
//! the local ledger mutation, and only then execute the token/value
//! interactions. A failure can only happen before anything changed,
//! and a re-entrant caller can only observe the already-committed state.

use crate::error::Result;
use aura_core::constants::{
    PROCEEDS_WALLET, SALE_RESERVE_WALLET, STAKING_POOL_WALLET, TAX_WALLET, VESTING_RESERVE_WALLET,
};
use aura_core::{Address, TokenError, TokenLedger, TokenStats, COIN};
use aura_sale::{IcoSaleEngine, IcoStatus, PurchasePlan, SaleEvent};
use serde::{Deserialize, Serialize};
use staking::{
    SnapshotReport, Stake, StakeLedger, StakeTier, StakingEvent, UnstakeOutcome,
};
use vesting::{VestingError, VestingLedger, VestingSchedule, VestingType};

/// Genesis float for the three-tier sale (sum of the tier allotments).
pub const GENESIS_SALE_RESERVE: u128 = 100_000_000 * COIN;

/// Genesis float backing vesting grants until they release.
pub const GENESIS_VESTING_RESERVE: u128 = 100_000_000 * COIN;

/// Genesis reward pool paying staking yield on top of returned principal.
pub const GENESIS_REWARD_POOL: u128 = 50_000_000 * COIN;

/// Value-side (ETH-equivalent) movements. The payment ledger itself is an
/// external collaborator, so forwards and refunds are recorded, not held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValueEvent {
    TaxForwarded { to: Address, amount: u128 },
    ProceedsForwarded { to: Address, amount: u128 },
    Refunded { to: Address, amount: u128 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyStats {
    pub token: TokenStats,
    pub total_active_stakers: u64,
    pub active_case: usize,
    pub ico_active: bool,
    pub total_tokens_sold: u128,
    pub tax_forwarded: u128,
    pub proceeds_forwarded: u128,
    pub value_refunded: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEconomy {
    token: TokenLedger,
    staking: StakeLedger,
    sale: IcoSaleEngine,
    vesting: VestingLedger,
    tax_forwarded: u128,
    proceeds_forwarded: u128,
    value_refunded: u128,
    value_events: Vec<ValueEvent>,
}

impl TokenEconomy {
    /// Economy with the standard genesis reserves.
    pub fn new() -> Self {
        Self::with_reserves(
            GENESIS_SALE_RESERVE,
            GENESIS_VESTING_RESERVE,
            GENESIS_REWARD_POOL,
        )
        .expect("genesis allocations fit the supply cap")
    }

    /// Economy with explicit reserve sizes (tests exercise underfunded
    /// pools through this).
    pub fn with_reserves(
        sale_reserve: u128,
        vesting_reserve: u128,
        reward_pool: u128,
    ) -> Result<Self> {
        let mut token = TokenLedger::new();
        token.mint(SALE_RESERVE_WALLET, sale_reserve)?;
        token.mint(VESTING_RESERVE_WALLET, vesting_reserve)?;
        token.mint(STAKING_POOL_WALLET, reward_pool)?;
        Ok(TokenEconomy {
            token,
            staking: StakeLedger::new(),
            sale: IcoSaleEngine::new(),
            vesting: VestingLedger::new(),
            tax_forwarded: 0,
            proceeds_forwarded: 0,
            value_refunded: 0,
            value_events: Vec::new(),
        })
    }

    // --- staking ----------------------------------------------------------

    pub fn stake(
        &mut self,
        staker: &str,
        amount: u128,
        locked_up: bool,
        lock_duration: u64,
        now: u64,
    ) -> Result<()> {
        // validate
        self.token.require_not_blacklisted(staker)?;
        let balance = self.token.balance_of(staker);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available: balance,
            }
            .into());
        }

        // effects
        let has_vesting = self.vesting.has_active_schedule(staker);
        self.staking
            .stake(staker, amount, locked_up, lock_duration, has_vesting, now)?;

        // interactions: principal moves into the pool. Staking is not an
        // outbound user transfer, so the vesting gate does not apply.
        self.token.transfer(staker, STAKING_POOL_WALLET, amount)?;
        Ok(())
    }

    pub fn unstake(&mut self, staker: &str, amount: u128, now: u64) -> Result<UnstakeOutcome> {
        // validate, including pool feasibility for the full payout
        self.token.require_not_blacklisted(staker)?;
        let has_vesting = self.vesting.has_active_schedule(staker);
        let preview = self
            .staking
            .preview_unstake(staker, amount, has_vesting, now)?;
        let payout = preview.burned + preview.net;
        let pool = self.token.balance_of(STAKING_POOL_WALLET);
        if pool < payout {
            return Err(TokenError::InsufficientBalance {
                requested: payout,
                available: pool,
            }
            .into());
        }

        // effects
        let outcome = self.staking.unstake(staker, amount, has_vesting, now)?;

        // interactions: burn the fixed cut of principal + reward, then pay
        self.token.burn(STAKING_POOL_WALLET, outcome.burned)?;
        self.token
            .transfer(STAKING_POOL_WALLET, staker, outcome.net)?;
        Ok(outcome)
    }

    pub fn lock_tokens(
        &mut self,
        staker: &str,
        amount: u128,
        duration: u64,
        now: u64,
    ) -> Result<()> {
        self.token.require_not_blacklisted(staker)?;
        let balance = self.token.balance_of(staker);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available: balance,
            }
            .into());
        }

        self.staking.lock_tokens(staker, amount, duration, now)?;

        self.token.transfer(staker, STAKING_POOL_WALLET, amount)?;
        Ok(())
    }

    pub fn take_snapshot(&mut self, now: u64) -> Result<SnapshotReport> {
        Ok(self.staking.take_snapshot(now)?)
    }

    // --- sale -------------------------------------------------------------

    pub fn buy_tokens(
        &mut self,
        buyer: &str,
        requested_tokens: u128,
        paid_value: u128,
    ) -> Result<PurchasePlan> {
        // validate
        self.token.require_not_blacklisted(buyer)?;
        let plan = self.sale.quote(buyer, requested_tokens, paid_value)?;
        let reserve = self.token.balance_of(SALE_RESERVE_WALLET);
        if reserve < plan.tokens_bought {
            return Err(TokenError::InsufficientBalance {
                requested: plan.tokens_bought,
                available: reserve,
            }
            .into());
        }

        // effects
        self.sale.commit(&plan);

        // interactions: tokens to the buyer, value to its wallets
        self.token
            .transfer(SALE_RESERVE_WALLET, buyer, plan.tokens_bought)?;
        self.forward_value(&plan);
        Ok(plan)
    }

    fn forward_value(&mut self, plan: &PurchasePlan) {
        self.tax_forwarded += plan.tax;
        self.value_events.push(ValueEvent::TaxForwarded {
            to: TAX_WALLET.to_string(),
            amount: plan.tax,
        });
        self.proceeds_forwarded += plan.total_cost;
        self.value_events.push(ValueEvent::ProceedsForwarded {
            to: PROCEEDS_WALLET.to_string(),
            amount: plan.total_cost,
        });
        if plan.refund > 0 {
            self.value_refunded += plan.refund;
            self.value_events.push(ValueEvent::Refunded {
                to: plan.buyer.clone(),
                amount: plan.refund,
            });
        }
    }

    // --- vesting ----------------------------------------------------------

    pub fn add_to_vesting(
        &mut self,
        account: &str,
        amount: u128,
        vesting_type_code: u8,
        now: u64,
    ) -> Result<()> {
        self.token.require_not_blacklisted(account)?;
        let vesting_type = VestingType::from_code(vesting_type_code)?;
        self.vesting
            .add_schedule(account, amount, vesting_type, now)?;
        log::info!(
            "Vesting grant for {account}: {amount} over {}s",
            vesting_type.duration()
        );
        Ok(())
    }

    pub fn release_vested(&mut self, account: &str, now: u64) -> Result<u128> {
        // validate, including reserve feasibility for the exact release
        self.token.require_not_blacklisted(account)?;
        let releasable = self.vesting.vested_amount(account, now);
        let reserve = self.token.balance_of(VESTING_RESERVE_WALLET);
        if releasable > reserve {
            return Err(TokenError::InsufficientBalance {
                requested: releasable,
                available: reserve,
            }
            .into());
        }

        // effects
        let released = self.vesting.release(account, now)?;

        // interactions: the release credits the transferable balance
        self.token
            .transfer(VESTING_RESERVE_WALLET, account, released)?;
        Ok(released)
    }

    // --- transfers --------------------------------------------------------

    /// User-facing transfer: blacklist-gated on both ends and rejected
    /// outright while the sender has an active, unexpired vesting
    /// schedule.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u128, now: u64) -> Result<()> {
        if self.vesting.has_transfer_lock(from, now) {
            return Err(VestingError::VestedTokensCannotBeTransferred.into());
        }
        self.token.transfer(from, to, amount)?;
        Ok(())
    }

    // --- administration ---------------------------------------------------

    pub fn enable_staking(&mut self, enabled: bool) {
        self.staking.set_staking_enabled(enabled);
    }

    pub fn end_sale(&mut self) {
        self.sale.end_sale();
    }

    pub fn allowlist_add(&mut self, address: &str) {
        self.staking.allowlist_add(address);
    }

    pub fn allowlist_remove(&mut self, address: &str) {
        self.staking.allowlist_remove(address);
    }

    pub fn blacklist_add(&mut self, address: &str) {
        self.token.blacklist_add(address);
    }

    pub fn blacklist_remove(&mut self, address: &str) {
        self.token.blacklist_remove(address);
    }

    pub fn mint(&mut self, to: &str, amount: u128) -> Result<()> {
        Ok(self.token.mint(to, amount)?)
    }

    // --- queries ----------------------------------------------------------

    pub fn balance_of(&self, address: &str) -> u128 {
        self.token.balance_of(address)
    }

    pub fn get_stake(&self, staker: &str) -> Option<Stake> {
        self.staking.get_stake(staker).cloned()
    }

    pub fn get_reward(&self, staker: &str, now: u64) -> Result<u128> {
        Ok(self.staking.pending_reward(staker, now)?)
    }

    pub fn get_current_case_and_total_stakers(&self) -> (usize, u64) {
        (
            self.staking.active_case(),
            self.staking.total_active_stakers(),
        )
    }

    pub fn roster_page(&self, tier: StakeTier, offset: usize, limit: usize) -> Vec<Address> {
        self.staking.roster_page(tier, offset, limit)
    }

    pub fn is_snapshot_eligible(&self, staker: &str) -> bool {
        self.staking.is_eligible(staker)
    }

    pub fn get_vesting_schedules(&self, account: &str) -> Vec<VestingSchedule> {
        self.vesting.schedules(account).to_vec()
    }

    pub fn get_vested_amount(&self, account: &str, now: u64) -> u128 {
        self.vesting.vested_amount(account, now)
    }

    pub fn get_ico_state(&self) -> IcoStatus {
        self.sale.status()
    }

    pub fn stats(&self) -> EconomyStats {
        let ico = self.sale.status();
        EconomyStats {
            token: self.token.stats(),
            total_active_stakers: self.staking.total_active_stakers(),
            active_case: self.staking.active_case(),
            ico_active: ico.active,
            total_tokens_sold: ico.total_tokens_sold,
            tax_forwarded: self.tax_forwarded,
            proceeds_forwarded: self.proceeds_forwarded,
            value_refunded: self.value_refunded,
        }
    }

    // --- events -----------------------------------------------------------

    pub fn drain_staking_events(&mut self) -> Vec<StakingEvent> {
        self.staking.drain_events()
    }

    pub fn drain_sale_events(&mut self) -> Vec<SaleEvent> {
        self.sale.drain_events()
    }

    pub fn drain_value_events(&mut self) -> Vec<ValueEvent> {
        std::mem::take(&mut self.value_events)
    }
}

impl Default for TokenEconomy {
    fn default() -> Self {
        Self::new()
    }
}
