//! Marketplace configuration.

use serde::{Deserialize, Serialize};

use crate::{constants, Address, MarketError, Result};

/// The mutable administrative state of the settlement engine.
///
/// `admin` is the only address allowed to change fees, the treasury, or the
/// currency allowlist. Both fields start from the deployment defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// Privileged caller for the administrative entry points.
    pub admin: Address,
    /// Recipient of the platform-fee share of every fill.
    pub treasury: Address,
    /// Platform fee in basis points; capped at
    /// [`constants::MAX_PLATFORM_FEE_BPS`].
    pub platform_fee_bps: u16,
}

impl MarketplaceConfig {
    /// Config with the default platform fee.
    #[must_use]
    pub fn new(admin: Address, treasury: Address) -> Self {
        Self {
            admin,
            treasury,
            platform_fee_bps: constants::DEFAULT_PLATFORM_FEE_BPS,
        }
    }

    /// Update the platform fee, enforcing the hard cap.
    pub fn set_platform_fee_bps(&mut self, bps: u16) -> Result<()> {
        if bps > constants::MAX_PLATFORM_FEE_BPS {
            return Err(MarketError::FeeTooHigh {
                bps,
                cap: constants::MAX_PLATFORM_FEE_BPS,
            });
        }
        self.platform_fee_bps = bps;
        Ok(())
    }
}
