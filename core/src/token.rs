//! Fungible token ledger
//!
//! Balances, supply and the mint/burn/transfer primitives the staking,
//! sale and vesting engines call into. The blacklist is checked at the
//! entry of every transfer; mint and burn are system operations and
//! bypass it.

use crate::constants::MAX_SUPPLY;
use crate::error::{Result, TokenError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type Address = String;

/// Supply and circulation counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenStats {
    pub total_supply: u128,
    pub total_minted: u128,
    pub total_burned: u128,
    pub holders: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenLedger {
    balances: HashMap<Address, u128>,
    blacklist: HashSet<Address>,
    total_supply: u128,
    total_minted: u128,
    total_burned: u128,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, address: &str) -> u128 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn stats(&self) -> TokenStats {
        TokenStats {
            total_supply: self.total_supply,
            total_minted: self.total_minted,
            total_burned: self.total_burned,
            holders: self.balances.values().filter(|b| **b > 0).count(),
        }
    }

    pub fn is_blacklisted(&self, address: &str) -> bool {
        self.blacklist.contains(address)
    }

    pub fn blacklist_add(&mut self, address: &str) {
        self.blacklist.insert(address.to_string());
    }

    pub fn blacklist_remove(&mut self, address: &str) {
        self.blacklist.remove(address);
    }

    /// Reject blacklisted callers at operation entry.
    pub fn require_not_blacklisted(&self, address: &str) -> Result<()> {
        if self.is_blacklisted(address) {
            return Err(TokenError::BlacklistedAddress(address.to_string()));
        }
        Ok(())
    }

    pub fn mint(&mut self, to: &str, amount: u128) -> Result<()> {
        if to.is_empty() {
            return Err(TokenError::InvalidAddress);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::AmountOverflow)?;
        if new_supply > MAX_SUPPLY {
            return Err(TokenError::MaxSupplyExceeded {
                requested: amount,
                supply: self.total_supply,
            });
        }

        let balance = self.balances.entry(to.to_string()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(TokenError::AmountOverflow)?;
        self.total_supply = new_supply;
        self.total_minted += amount;
        Ok(())
    }

    pub fn burn(&mut self, from: &str, amount: u128) -> Result<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available: balance,
            });
        }
        self.balances.insert(from.to_string(), balance - amount);
        self.total_supply -= amount;
        self.total_burned += amount;
        Ok(())
    }

    pub fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<()> {
        if from.is_empty() || to.is_empty() {
            return Err(TokenError::InvalidAddress);
        }
        self.require_not_blacklisted(from)?;
        self.require_not_blacklisted(to)?;

        let sender = self.balance_of(from);
        if sender < amount {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available: sender,
            });
        }

        self.balances.insert(from.to_string(), sender - amount);
        let recipient = self.balances.entry(to.to_string()).or_insert(0);
        *recipient = recipient
            .checked_add(amount)
            .ok_or(TokenError::AmountOverflow)?;
        Ok(())
    }
}
