//! Engine error type
//!
//! One typed failure surface over the four subsystems. Nothing is
//! retried automatically; every error reaches the caller with the ledger
//! state exactly as it was before the operation.

use aura_core::TokenError;
use aura_sale::SaleError;
use staking::StakingError;
use thiserror::Error;
use vesting::VestingError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Staking(#[from] StakingError),

    #[error(transparent)]
    Sale(#[from] SaleError),

    #[error(transparent)]
    Vesting(#[from] VestingError),
}

pub type Result<T> = std::result::Result<T, EconomyError>;
