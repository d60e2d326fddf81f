//! Single-writer shared handle
//!
//! The whole economy serializes behind one mutex: tier rosters and case
//! totals are cross-staker shared state, so per-staker locking cannot be
//! correct. Every operation runs to completion inside the lock; there
//! is no suspension point mid-operation, and therefore no interleaving
//! for a re-entrant caller to exploit.

use crate::economy::TokenEconomy;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone)]
pub struct SharedEconomy {
    inner: Arc<Mutex<TokenEconomy>>,
}

impl SharedEconomy {
    pub fn new(economy: TokenEconomy) -> Self {
        SharedEconomy {
            inner: Arc::new(Mutex::new(economy)),
        }
    }

    /// Run an operation (or a batch of them) atomically.
    pub fn with<R>(&self, f: impl FnOnce(&mut TokenEconomy) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl Default for SharedEconomy {
    fn default() -> Self {
        Self::new(TokenEconomy::new())
    }
}
