//! Sale error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    #[error("ICO is not active")]
    IcoInactive,

    #[error("Payment below minimum buy: minimum {minimum}")]
    BelowMinimumBuy { minimum: u128 },

    #[error("Payment exceeds maximum buy: limit {limit}")]
    ExceedsMaximumBuy { limit: u128 },

    #[error("Overflow in cost calculation")]
    OverflowInCostCalculation,

    #[error("Insufficient funds for purchase")]
    InsufficientFundsForPurchase,
}

pub type Result<T> = std::result::Result<T, SaleError>;
