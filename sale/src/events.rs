//! Sale domain events

use aura_core::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SaleEvent {
    TokensPurchased {
        buyer: Address,
        tokens: u128,
        cost: u128,
        tax: u128,
        refund: u128,
    },
    TierSoldUpdated {
        tier: u8,
        sold: u128,
    },
    TierAdvanced {
        from: u8,
        to: u8,
    },
    SaleEnded {
        sold_out: bool,
    },
}
