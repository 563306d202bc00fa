//! Accepted payment currencies.
//!
//! The native currency (the zero-address sentinel) is allowed from
//! deployment; payment tokens are added and removed through the engine's
//! administrative surface.

use std::collections::HashSet;

use artmarket_types::{Address, MarketError, Result};

/// The set of currencies asks may be priced in.
#[derive(Debug, Clone)]
pub struct CurrencyAllowlist {
    allowed: HashSet<Address>,
}

impl CurrencyAllowlist {
    /// A fresh allowlist with only the native currency enabled.
    #[must_use]
    pub fn new() -> Self {
        let mut allowed = HashSet::new();
        allowed.insert(Address::ZERO);
        Self { allowed }
    }

    /// Enable or disable a currency.
    pub fn set_allowed(&mut self, currency: Address, allowed: bool) {
        if allowed {
            self.allowed.insert(currency);
        } else {
            self.allowed.remove(&currency);
        }
    }

    #[must_use]
    pub fn is_allowed(&self, currency: Address) -> bool {
        self.allowed.contains(&currency)
    }

    /// Gate used during fill validation.
    pub fn check(&self, currency: Address) -> Result<()> {
        if !self.is_allowed(currency) {
            return Err(MarketError::CurrencyNotAllowed(currency));
        }
        Ok(())
    }
}

impl Default for CurrencyAllowlist {
    fn default() -> Self {
        Self::new()
    }
}
