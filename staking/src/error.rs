//! Staking error types

use aura_core::MathError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StakingError {
    #[error("Staking is disabled")]
    StakingDisabled,

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Amount below minimum stake: minimum {minimum}")]
    BelowMinimumStake { minimum: u128 },

    #[error("Invalid lock duration: {duration}s outside [{min}s, {max}s]")]
    InvalidLockDuration { duration: u64, min: u64, max: u64 },

    #[error("No active stake for {0}")]
    NoActiveStake(String),

    #[error("Insufficient stake: requested {requested}, staked {staked}")]
    InsufficientStake { requested: u128, staked: u128 },

    #[error("Tokens still locked until {unlock_at}")]
    TokensStillLocked { unlock_at: u64 },

    #[error("Tier {tier} is at capacity ({cap} wallets) under the active case")]
    TierCapacityReached { tier: &'static str, cap: u64 },

    #[error("Not a quarter start")]
    NotQuarterStart,

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type Result<T> = std::result::Result<T, StakingError>;
