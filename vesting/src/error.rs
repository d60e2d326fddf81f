//! Vesting error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VestingError {
    #[error("Invalid address")]
    InvalidAddress,

    #[error("Invalid vesting type: {0}")]
    InvalidVestingType(u8),

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Amount exceeds the supply cap {cap}")]
    AmountExceedsCap { cap: u128 },

    #[error("No active vesting schedule for {0}")]
    VestingNotActive(String),

    #[error("No tokens to release")]
    NoTokensToRelease,

    #[error("Vested tokens cannot be transferred")]
    VestedTokensCannotBeTransferred,
}

pub type Result<T> = std::result::Result<T, VestingError>;
