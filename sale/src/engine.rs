//! Tiered ICO sale engine
//!
//! Three sequential price tiers with fixed allotments and a strictly
//! rising unit price. A purchase fills greedily from the current tier,
//! spilling into the next when an allotment runs dry, until the request
//! is filled, the budget runs out or the final tier sells out, which
//! ends the sale for good.
//!
//! Quoting is pure and committing is separate, so a settlement layer can
//! order validation, state mutation and outbound transfers strictly.

use crate::error::{Result, SaleError};
use crate::events::SaleEvent;
use aura_core::constants::SALE_TAX_PERCENT;
use aura_core::{math, Address, COIN};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of price tiers.
pub const SALE_TIER_COUNT: usize = 3;

/// Fixed token allotment per tier.
pub const TIER_ALLOTMENTS: [u128; SALE_TIER_COUNT] =
    [40_000_000 * COIN, 35_000_000 * COIN, 25_000_000 * COIN];

/// Fixed unit price per tier, in value-wei per whole token. The ladder
/// only rises.
pub const TIER_PRICES: [u128; SALE_TIER_COUNT] =
    [100_000_000_000, 200_000_000_000, 400_000_000_000];

/// Smallest accepted payment per transaction (0.1 ETH).
pub const MIN_BUY_VALUE: u128 = 100_000_000_000_000_000;

/// Largest accepted payment per transaction (20 ETH).
pub const MAX_BUY_VALUE: u128 = 20_000_000_000_000_000_000;

/// Cumulative spend ceiling per buyer (50 ETH).
pub const MAX_BUYER_SPEND: u128 = 50_000_000_000_000_000_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaleTier {
    pub allotment: u128,
    pub price: u128,
    pub sold: u128,
}

impl SaleTier {
    pub fn remaining(&self) -> u128 {
        self.allotment - self.sold
    }
}

/// One tier's share of a purchase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierFill {
    /// 1-based tier number
    pub tier: u8,
    pub tokens: u128,
    pub cost: u128,
}

/// Fully validated purchase, ready to commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchasePlan {
    pub buyer: Address,
    pub tokens_bought: u128,
    pub total_cost: u128,
    pub tax: u128,
    /// Unspent remainder returned to the buyer
    pub refund: u128,
    pub fills: Vec<TierFill>,
    /// Whether committing this plan sells out the final tier
    pub ends_sale: bool,
}

/// Read-only view of the sale state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcoStatus {
    pub current_tier: u8,
    pub active: bool,
    pub tiers: [SaleTier; SALE_TIER_COUNT],
    pub total_tokens_sold: u128,
    pub total_value_raised: u128,
    pub total_tax_collected: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcoSaleEngine {
    tiers: [SaleTier; SALE_TIER_COUNT],
    /// 0-based cursor into `tiers`
    current: usize,
    active: bool,
    buyer_spend: HashMap<Address, u128>,
    total_value_raised: u128,
    total_tax_collected: u128,
    events: Vec<SaleEvent>,
}

impl Default for IcoSaleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IcoSaleEngine {
    pub fn new() -> Self {
        let mut tiers = [SaleTier {
            allotment: 0,
            price: 0,
            sold: 0,
        }; SALE_TIER_COUNT];
        for (i, tier) in tiers.iter_mut().enumerate() {
            tier.allotment = TIER_ALLOTMENTS[i];
            tier.price = TIER_PRICES[i];
        }
        IcoSaleEngine {
            tiers,
            current: 0,
            active: true,
            buyer_spend: HashMap::new(),
            total_value_raised: 0,
            total_tax_collected: 0,
            events: Vec::new(),
        }
    }

    // --- queries ----------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 1-based tier currently selling.
    pub fn current_tier(&self) -> u8 {
        self.current as u8 + 1
    }

    pub fn tier(&self, tier: u8) -> &SaleTier {
        &self.tiers[tier as usize - 1]
    }

    pub fn buyer_spend(&self, buyer: &str) -> u128 {
        self.buyer_spend.get(buyer).copied().unwrap_or(0)
    }

    pub fn status(&self) -> IcoStatus {
        IcoStatus {
            current_tier: self.current_tier(),
            active: self.active,
            tiers: self.tiers,
            total_tokens_sold: self.tiers.iter().map(|t| t.sold).sum(),
            total_value_raised: self.total_value_raised,
            total_tax_collected: self.total_tax_collected,
        }
    }

    pub fn drain_events(&mut self) -> Vec<SaleEvent> {
        std::mem::take(&mut self.events)
    }

    // --- operations -------------------------------------------------------

    /// Validate a purchase and price it against the current tier ladder
    /// without mutating anything.
    pub fn quote(
        &self,
        buyer: &str,
        requested_tokens: u128,
        paid_value: u128,
    ) -> Result<PurchasePlan> {
        if !self.active {
            return Err(SaleError::IcoInactive);
        }
        if paid_value < MIN_BUY_VALUE {
            return Err(SaleError::BelowMinimumBuy {
                minimum: MIN_BUY_VALUE,
            });
        }
        if paid_value > MAX_BUY_VALUE {
            return Err(SaleError::ExceedsMaximumBuy {
                limit: MAX_BUY_VALUE,
            });
        }
        let prior_spend = self.buyer_spend(buyer);
        let prospective = prior_spend
            .checked_add(paid_value)
            .ok_or(SaleError::OverflowInCostCalculation)?;
        if prospective > MAX_BUYER_SPEND {
            return Err(SaleError::ExceedsMaximumBuy {
                limit: MAX_BUYER_SPEND,
            });
        }

        // The tax comes off the top; only the remainder buys tokens.
        let tax = math::percent(paid_value, SALE_TAX_PERCENT)
            .map_err(|_| SaleError::OverflowInCostCalculation)?;
        let mut budget = paid_value - tax;
        let mut remaining = requested_tokens;
        let mut fills: Vec<TierFill> = Vec::new();

        let mut cursor = self.current;
        while remaining > 0 && budget > 0 && cursor < SALE_TIER_COUNT {
            let tier = &self.tiers[cursor];
            let available = tier.remaining();
            if available == 0 {
                cursor += 1;
                continue;
            }

            let mut take = remaining.min(available);
            let mut cost = math::mul_div(take, tier.price, COIN)
                .map_err(|_| SaleError::OverflowInCostCalculation)?;
            if cost > budget {
                // Scale down to what the budget affords; the flooring
                // discards any sub-unit entitlement rather than carrying
                // it into the next tier.
                take = math::mul_div(budget, COIN, tier.price)
                    .map_err(|_| SaleError::OverflowInCostCalculation)?;
                if take == 0 {
                    break;
                }
                cost = math::mul_div(take, tier.price, COIN)
                    .map_err(|_| SaleError::OverflowInCostCalculation)?;
            }

            fills.push(TierFill {
                tier: cursor as u8 + 1,
                tokens: take,
                cost,
            });
            remaining -= take;
            budget -= cost;
            if take == available {
                cursor += 1;
            } else {
                break;
            }
        }

        let tokens_bought: u128 = fills.iter().map(|f| f.tokens).sum();
        if tokens_bought == 0 {
            return Err(SaleError::InsufficientFundsForPurchase);
        }
        let total_cost: u128 = fills.iter().map(|f| f.cost).sum();

        let last = &self.tiers[SALE_TIER_COUNT - 1];
        let final_fill: u128 = fills
            .iter()
            .filter(|f| f.tier as usize == SALE_TIER_COUNT)
            .map(|f| f.tokens)
            .sum();
        let ends_sale = last.sold + final_fill == last.allotment;

        Ok(PurchasePlan {
            buyer: buyer.to_string(),
            tokens_bought,
            total_cost,
            tax,
            refund: paid_value - tax - total_cost,
            fills,
            ends_sale,
        })
    }

    /// Apply a plan quoted against the current state.
    pub fn commit(&mut self, plan: &PurchasePlan) {
        for fill in &plan.fills {
            let index = fill.tier as usize - 1;
            self.tiers[index].sold += fill.tokens;
            self.events.push(SaleEvent::TierSoldUpdated {
                tier: fill.tier,
                sold: self.tiers[index].sold,
            });
        }

        // Advance past exhausted tiers
        while self.current < SALE_TIER_COUNT - 1 && self.tiers[self.current].remaining() == 0 {
            let from = self.current as u8 + 1;
            self.current += 1;
            log::info!("Sale tier {} sold out, now selling tier {}", from, from + 1);
            self.events.push(SaleEvent::TierAdvanced {
                from,
                to: from + 1,
            });
        }

        let spent = plan.tax + plan.total_cost;
        *self.buyer_spend.entry(plan.buyer.clone()).or_insert(0) += spent;
        self.total_value_raised += plan.total_cost;
        self.total_tax_collected += plan.tax;

        self.events.push(SaleEvent::TokensPurchased {
            buyer: plan.buyer.clone(),
            tokens: plan.tokens_bought,
            cost: plan.total_cost,
            tax: plan.tax,
            refund: plan.refund,
        });

        if self.tiers[SALE_TIER_COUNT - 1].remaining() == 0 && self.active {
            self.active = false;
            log::info!("Final sale tier sold out, ICO ended");
            self.events.push(SaleEvent::SaleEnded { sold_out: true });
        }
    }

    /// Quote and commit in one step.
    pub fn buy(
        &mut self,
        buyer: &str,
        requested_tokens: u128,
        paid_value: u128,
    ) -> Result<PurchasePlan> {
        let plan = self.quote(buyer, requested_tokens, paid_value)?;
        self.commit(&plan);
        Ok(plan)
    }

    /// Operator stop. Terminal: there is no path back to `active`.
    pub fn end_sale(&mut self) {
        if self.active {
            self.active = false;
            log::info!("ICO ended by operator");
            self.events.push(SaleEvent::SaleEnded { sold_out: false });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETH: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_quote_bounds() {
        let engine = IcoSaleEngine::new();
        assert_eq!(
            engine.quote("alice", COIN, MIN_BUY_VALUE - 1),
            Err(SaleError::BelowMinimumBuy {
                minimum: MIN_BUY_VALUE
            })
        );
        assert_eq!(
            engine.quote("alice", COIN, MAX_BUY_VALUE + 1),
            Err(SaleError::ExceedsMaximumBuy {
                limit: MAX_BUY_VALUE
            })
        );
    }

    #[test]
    fn test_cumulative_spend_cap() {
        let mut engine = IcoSaleEngine::new();
        engine.buyer_spend.insert("whale".to_string(), 45 * ETH);

        // The pre-check counts the whole payment against the ceiling
        let result = engine.quote("whale", COIN, 10 * ETH);
        assert_eq!(
            result,
            Err(SaleError::ExceedsMaximumBuy {
                limit: MAX_BUYER_SPEND
            })
        );
        // A payment that stays under the ceiling still goes through
        assert!(engine.quote("whale", COIN, 5 * ETH).is_ok());
    }

    #[test]
    fn test_simple_purchase_math() {
        let mut engine = IcoSaleEngine::new();
        // 1 ETH pays 0.05 tax, leaving 0.95 ETH; tier 1 at 1e11 wei/token
        // affords exactly 9.5M tokens.
        let plan = engine.buy("alice", 10_000_000 * COIN, ETH).unwrap();
        assert_eq!(plan.tax, ETH / 20);
        assert_eq!(plan.tokens_bought, 9_500_000 * COIN);
        assert_eq!(plan.total_cost, ETH - ETH / 20);
        assert_eq!(plan.refund, 0);
        assert_eq!(engine.tier(1).sold, 9_500_000 * COIN);
        assert_eq!(engine.current_tier(), 1);
    }

    #[test]
    fn test_request_smaller_than_budget_refunds() {
        let mut engine = IcoSaleEngine::new();
        // Request 1M tokens (0.1 ETH at tier 1) while paying 1 ETH
        let plan = engine.buy("alice", 1_000_000 * COIN, ETH).unwrap();
        assert_eq!(plan.tokens_bought, 1_000_000 * COIN);
        assert_eq!(plan.total_cost, 1_000_000 * COIN / COIN * 100_000_000_000);
        assert_eq!(plan.refund, ETH - plan.tax - plan.total_cost);
        assert!(plan.refund > 0);
    }

    #[test]
    fn test_tier_exhaustion_advances() {
        let mut engine = IcoSaleEngine::new();
        // Tier 1 holds 40M tokens at 1e11 wei = 4 ETH; pay enough to
        // cover cost plus the 5% tax.
        let plan = engine
            .buy("alice", TIER_ALLOTMENTS[0], 4_500_000_000_000_000_000)
            .unwrap();
        assert_eq!(plan.tokens_bought, TIER_ALLOTMENTS[0]);
        assert_eq!(plan.fills.len(), 1);
        assert_eq!(engine.tier(1).sold, TIER_ALLOTMENTS[0]);
        assert_eq!(engine.current_tier(), 2);

        // The next purchase prices at tier 2
        let next = engine.buy("bob", 1_000_000 * COIN, ETH).unwrap();
        assert_eq!(next.fills[0].tier, 2);
        assert_eq!(next.total_cost, 1_000_000 * TIER_PRICES[1]);
    }

    #[test]
    fn test_partial_fill_spills_across_tiers() {
        let mut engine = IcoSaleEngine::new();
        engine
            .buy("alice", TIER_ALLOTMENTS[0], 4_500_000_000_000_000_000)
            .unwrap();

        // Drain tier 2 and bite into tier 3 in a single purchase
        let request = TIER_ALLOTMENTS[1] + 1_000_000 * COIN;
        let plan = engine.buy("bob", request, 8 * ETH).unwrap();
        assert_eq!(plan.fills.len(), 2);
        assert_eq!(plan.fills[0].tier, 2);
        assert_eq!(plan.fills[0].tokens, TIER_ALLOTMENTS[1]);
        assert_eq!(plan.fills[1].tier, 3);
        assert_eq!(plan.fills[1].tokens, 1_000_000 * COIN);
        assert_eq!(
            plan.total_cost,
            35_000_000 * TIER_PRICES[1] + 1_000_000 * TIER_PRICES[2]
        );
        assert_eq!(engine.current_tier(), 3);
    }

    #[test]
    fn test_budget_exhaustion_floors_the_take() {
        let mut engine = IcoSaleEngine::new();
        // 0.2 ETH: tax 0.01, budget 0.19 ETH buys 1.9M tier-1 tokens even
        // though 10M were requested; the shortfall is not carried over.
        let plan = engine
            .buy("alice", 10_000_000 * COIN, 200_000_000_000_000_000)
            .unwrap();
        assert_eq!(plan.tokens_bought, 1_900_000 * COIN);
        assert_eq!(plan.refund, 0);
    }

    #[test]
    fn test_sellout_ends_sale_permanently() {
        let mut engine = IcoSaleEngine::new();
        engine
            .buy("a", TIER_ALLOTMENTS[0], 4_500_000_000_000_000_000)
            .unwrap();
        engine
            .buy("b", TIER_ALLOTMENTS[1], 7_500_000_000_000_000_000)
            .unwrap();
        let last = engine
            .buy("c", TIER_ALLOTMENTS[2], 11_000_000_000_000_000_000)
            .unwrap();
        assert!(last.ends_sale);
        assert!(!engine.is_active());

        let events = engine.drain_events();
        assert!(events.contains(&SaleEvent::SaleEnded { sold_out: true }));

        // Terminal: no further purchases
        assert_eq!(
            engine.quote("d", COIN, ETH),
            Err(SaleError::IcoInactive)
        );
    }

    #[test]
    fn test_operator_end_sale() {
        let mut engine = IcoSaleEngine::new();
        engine.end_sale();
        assert!(!engine.is_active());
        assert_eq!(engine.quote("a", COIN, ETH), Err(SaleError::IcoInactive));

        let events = engine.drain_events();
        assert_eq!(events, vec![SaleEvent::SaleEnded { sold_out: false }]);
    }

    #[test]
    fn test_zero_request_rejected() {
        let engine = IcoSaleEngine::new();
        assert_eq!(
            engine.quote("alice", 0, ETH),
            Err(SaleError::InsufficientFundsForPurchase)
        );
    }

    #[test]
    fn test_price_ladder_rises() {
        for pair in TIER_PRICES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
