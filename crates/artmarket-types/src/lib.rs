//! # artmarket-types
//!
//! Shared types, errors, and configuration for the **ArtMarket** order
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`OrderHash`]
//! - **Order model**: [`Ask`], [`AssetKind`], [`PricingStrategy`]
//! - **Event model**: [`OrderFilled`], [`OrderCancelled`], [`MarketEvent`]
//! - **Fee math**: [`FeeSplit`], [`split_fees`], [`bps_share`]
//! - **Configuration**: [`MarketplaceConfig`]
//! - **Errors**: [`MarketError`] with `AM_ERR_` prefix codes
//! - **Constants**: protocol name/version, fee caps and defaults

pub mod ask;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fee;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use artmarket_types::{Ask, Address, MarketError, ...};

pub use ask::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use fee::*;
pub use ids::*;

// Constants are accessed via `artmarket_types::constants::FOO`
// (not re-exported to avoid name collisions).
