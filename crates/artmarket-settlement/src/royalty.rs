//! Royalty lookup — an external, read-only collaborator.
//!
//! The engine tolerates a missing royalty entry: a lookup miss settles the
//! fill with zero royalty instead of aborting, because absence of royalty
//! configuration is an expected condition for most collections. This is a
//! deliberate availability-over-creator-protection policy inherited from
//! the deployed registry; revisit before treating it as final.

use std::collections::HashMap;

use artmarket_types::Address;
use serde::{Deserialize, Serialize};

/// Where a sale's royalty share goes, and how large it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyInfo {
    pub receiver: Address,
    /// Royalty share in basis points of the total price.
    pub bps: u16,
}

/// Read side of the royalty registry.
pub trait RoyaltyOracle {
    /// Royalty configuration for one asset; `None` means zero royalty.
    fn royalty_for(&self, collection: Address, token_id: u128) -> Option<RoyaltyInfo>;
}

/// In-process royalty registry: per-token entries with a per-collection
/// default, the same precedence as the deployed registry contract.
#[derive(Debug, Clone, Default)]
pub struct RoyaltyRegistry {
    token_entries: HashMap<(Address, u128), RoyaltyInfo>,
    collection_defaults: HashMap<Address, RoyaltyInfo>,
}

impl RoyaltyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the royalty for one specific token, overriding any collection
    /// default.
    pub fn set_token_royalty(&mut self, collection: Address, token_id: u128, info: RoyaltyInfo) {
        self.token_entries.insert((collection, token_id), info);
    }

    /// Set the fallback royalty for every token of a collection.
    pub fn set_collection_royalty(&mut self, collection: Address, info: RoyaltyInfo) {
        self.collection_defaults.insert(collection, info);
    }
}

impl RoyaltyOracle for RoyaltyRegistry {
    fn royalty_for(&self, collection: Address, token_id: u128) -> Option<RoyaltyInfo> {
        self.token_entries
            .get(&(collection, token_id))
            .or_else(|| self.collection_defaults.get(&collection))
            .copied()
    }
}
