//! AURA Coin Sale Module
//!
//! Tiered initial sale: three fixed-allotment price tiers exhausted in
//! order, with a rising unit price, per-transaction and per-buyer spend
//! bounds, and an up-front tax cut on every payment. Selling out the
//! final tier ends the sale permanently.

pub mod engine;
pub mod error;
pub mod events;

pub use engine::{
    IcoSaleEngine, IcoStatus, PurchasePlan, SaleTier, TierFill, MAX_BUYER_SPEND, MAX_BUY_VALUE,
    MIN_BUY_VALUE, SALE_TIER_COUNT, TIER_ALLOTMENTS, TIER_PRICES,
};
pub use error::{Result, SaleError};
pub use events::SaleEvent;
