//! Per-maker nonce registry — the replay-protection core.
//!
//! A `(maker, nonce)` pair transitions from unused to used exactly once,
//! by either a fill or an explicit cancel, and never back. Used nonces are
//! retained permanently: unlike a settlement-receipt cache there is no
//! eviction, because forgetting a consumed nonce would re-open the order
//! for replay.

use std::collections::HashSet;

use artmarket_types::{Address, MarketError, Result};

/// Tracks consumed `(maker, nonce)` pairs.
#[derive(Debug, Default)]
pub struct NonceRegistry {
    used: HashSet<(Address, u64)>,
}

impl NonceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            used: HashSet::new(),
        }
    }

    /// Consume a nonce. Irreversible.
    ///
    /// # Errors
    /// [`MarketError::NonceUsed`] if the pair was already consumed.
    pub fn consume(&mut self, maker: Address, nonce: u64) -> Result<()> {
        if !self.used.insert((maker, nonce)) {
            return Err(MarketError::NonceUsed { maker, nonce });
        }
        Ok(())
    }

    /// Pre-check used by the engine and by external callers before a fill.
    #[must_use]
    pub fn is_used(&self, maker: Address, nonce: u64) -> bool {
        self.used.contains(&(maker, nonce))
    }

    /// Number of consumed nonces across all makers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
