//! Basis-point fee arithmetic.
//!
//! All splits are exact integer math: `platform_fee + royalty_amount +
//! seller_proceeds == total_price` always holds, with no rounding loss in
//! either direction. Rounding on each share truncates toward zero, so any
//! remainder stays with the seller.

use serde::{Deserialize, Serialize};

use crate::{constants::BPS_DENOMINATOR, MarketError, Result};

/// The share of `total` given by `bps` basis points, truncated.
pub fn bps_share(total: u128, bps: u16) -> Result<u128> {
    let scaled = total
        .checked_mul(u128::from(bps))
        .ok_or(MarketError::AmountOverflow)?;
    Ok(scaled / BPS_DENOMINATOR)
}

/// The exact three-way split of a fill's total price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    pub total_price: u128,
    pub platform_fee: u128,
    pub royalty_amount: u128,
    pub seller_proceeds: u128,
}

/// Split `total_price` into platform fee, royalty, and seller proceeds.
///
/// Combined fees above 100% are a configuration error; the fee cap and
/// royalty registry are expected to keep the sum well below that, so an
/// underflowing split surfaces as [`MarketError::AmountOverflow`].
pub fn split_fees(total_price: u128, platform_fee_bps: u16, royalty_bps: u16) -> Result<FeeSplit> {
    let platform_fee = bps_share(total_price, platform_fee_bps)?;
    let royalty_amount = bps_share(total_price, royalty_bps)?;
    let seller_proceeds = total_price
        .checked_sub(platform_fee)
        .and_then(|rest| rest.checked_sub(royalty_amount))
        .ok_or(MarketError::AmountOverflow)?;
    Ok(FeeSplit {
        total_price,
        platform_fee,
        royalty_amount,
        seller_proceeds,
    })
}

impl FeeSplit {
    /// Exact conservation: the three shares sum back to the total.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.platform_fee + self.royalty_amount + self.seller_proceeds == self.total_price
    }
}
