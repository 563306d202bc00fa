//! System-wide constants for the ArtMarket settlement engine.

/// Protocol name, part of every signing domain.
pub const PROTOCOL_NAME: &str = "ArtMarket";

/// Protocol version, part of every signing domain.
pub const PROTOCOL_VERSION: &str = "1";

/// Chain identifier of the default deployment target.
pub const DEFAULT_CHAIN_ID: u64 = 11_124;

/// Basis-point denominator: 10,000 bps = 100%.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Platform fee applied to fresh deployments (2%).
pub const DEFAULT_PLATFORM_FEE_BPS: u16 = 200;

/// Hard cap on the platform fee (10%); updates above this fail.
pub const MAX_PLATFORM_FEE_BPS: u16 = 1_000;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
