//! # artmarket-settlement
//!
//! **Settlement Processor**: order validation, atomic fill/cancel execution,
//! nonce bookkeeping, and the fee/royalty split.
//!
//! ## Architecture
//!
//! The [`SettlementEngine`] receives a signed [`Ask`](artmarket_types::Ask)
//! from a taker and:
//! 1. Verifies the maker signature against the canonical order hash
//! 2. Checks the `(maker, nonce)` pair is unconsumed
//! 3. Enforces the validity window, currency allowlist, and quantity bounds
//! 4. Computes the platform-fee / royalty / seller split
//! 5. Executes one atomic [`SettlementPlan`] against the injected ledger
//! 6. Consumes the nonce and journals an `OrderFilled` record
//!
//! All checks before the plan execution are side-effect-free; any failure
//! aborts the whole fill with no state change. The host ledger is assumed
//! serial — two racing fills of the same nonce resolve to exactly one
//! winner, the loser observing `NonceUsed`.

pub mod currencies;
pub mod engine;
pub mod ledger;
pub mod nonce_registry;
pub mod royalty;

pub use currencies::CurrencyAllowlist;
pub use engine::SettlementEngine;
pub use ledger::{AssetLeg, FundLeg, MemoryLedger, SettlementLedger, SettlementPlan};
pub use nonce_registry::NonceRegistry;
pub use royalty::{RoyaltyInfo, RoyaltyOracle, RoyaltyRegistry};
