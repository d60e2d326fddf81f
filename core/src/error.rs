//! Token ledger error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("Max supply exceeded: minting {requested} on top of {supply}")]
    MaxSupplyExceeded { requested: u128, supply: u128 },

    #[error("Blacklisted address: {0}")]
    BlacklistedAddress(String),

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Amount overflow")]
    AmountOverflow,
}

pub type Result<T> = std::result::Result<T, TokenError>;
