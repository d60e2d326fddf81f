//! AURA Coin Economy Engine
//!
//! Binds the token ledger, staking, sale and vesting subsystems into one
//! dispatch surface with strict validate / mutate / interact ordering,
//! administrative gates (staking switch, sale stop, allow-list,
//! blacklist) and the read-only query surface. `SharedEconomy` is the
//! single serialization point for concurrent hosts.

pub mod economy;
pub mod error;
pub mod shared;

pub use economy::{
    EconomyStats, TokenEconomy, ValueEvent, GENESIS_REWARD_POOL, GENESIS_SALE_RESERVE,
    GENESIS_VESTING_RESERVE,
};
pub use error::{EconomyError, Result};
pub use shared::SharedEconomy;
