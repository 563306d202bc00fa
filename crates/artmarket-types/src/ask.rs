//! The signed sell order ("Ask") at the heart of the marketplace.
//!
//! An ask is created and signed off-chain by the maker, handed to a taker
//! out of band, and only touches settlement state when filled or cancelled.
//! Once signed it is immutable: any field change invalidates the signature.

use serde::{Deserialize, Serialize};

use crate::{Address, MarketError, Result};

/// Which asset standard the collection implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AssetKind {
    /// One-of-one asset (original: ERC721C).
    Unique,
    /// Multi-edition asset with per-token supply (original: ERC1155C).
    MultiEdition,
}

impl AssetKind {
    /// Wire tag used in the signed encoding.
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Unique => 0,
            Self::MultiEdition => 1,
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unique => write!(f, "UNIQUE"),
            Self::MultiEdition => write!(f, "MULTI_EDITION"),
        }
    }
}

/// How the ask is priced.
///
/// `Auction` is reserved in the wire format but the settlement engine only
/// fills `FixedPrice` asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PricingStrategy {
    FixedPrice,
    Auction,
}

impl PricingStrategy {
    /// Wire tag used in the signed encoding.
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::FixedPrice => 0,
            Self::Auction => 1,
        }
    }
}

impl std::fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FixedPrice => write!(f, "FIXED_PRICE"),
            Self::Auction => write!(f, "AUCTION"),
        }
    }
}

/// A maker's signed offer to sell `quantity` units of `(collection, token_id)`
/// at `price` per unit, valid within `[start, end)`.
///
/// Field order matters: the order hash commits to the fields in exactly this
/// declaration order, so it must match the client-side signing schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ask {
    /// Order creator; must own the asset at fill time.
    pub maker: Address,
    /// The asset contract.
    pub collection: Address,
    /// The specific asset (or edition class) being sold.
    pub token_id: u128,
    /// Units offered: 1 for unique assets, >1 allowed for multi-edition.
    pub quantity: u64,
    /// Payment token; [`Address::ZERO`] means the native currency.
    pub currency: Address,
    /// Unit price in the smallest denomination of `currency`.
    pub price: u128,
    /// Validity window start (unix seconds, inclusive).
    pub start: u64,
    /// Validity window end (unix seconds, exclusive). `0` means no expiration.
    pub end: u64,
    /// Random value making otherwise-identical asks hash differently.
    pub salt: u128,
    /// Maker-scoped replay-protection counter, consumed on fill or cancel.
    pub nonce: u64,
    pub standard: AssetKind,
    pub strategy: PricingStrategy,
}

impl Ask {
    /// Shape validation: positive price and quantity, coherent window.
    pub fn validate(&self) -> Result<()> {
        if self.price == 0 {
            return Err(MarketError::InvalidOrder {
                reason: "price must be positive".to_string(),
            });
        }
        if self.quantity == 0 {
            return Err(MarketError::InvalidOrder {
                reason: "quantity must be positive".to_string(),
            });
        }
        if self.end != 0 && self.end <= self.start {
            return Err(MarketError::InvalidOrder {
                reason: format!("end {} must be after start {}", self.end, self.start),
            });
        }
        Ok(())
    }

    /// Check that `now` falls inside the validity window `[start, end)`.
    pub fn check_window(&self, now: u64) -> Result<()> {
        if now < self.start {
            return Err(MarketError::OrderNotStarted {
                start: self.start,
                now,
            });
        }
        if self.end != 0 && now >= self.end {
            return Err(MarketError::OrderExpired { end: self.end, now });
        }
        Ok(())
    }

    /// `true` when the ask is priced in the native currency.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.currency.is_zero()
    }

    /// Total price for `taker_quantity` units, with overflow checked.
    pub fn total_price(&self, taker_quantity: u64) -> Result<u128> {
        self.price
            .checked_mul(u128::from(taker_quantity))
            .ok_or(MarketError::AmountOverflow)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Ask {
    /// An open-ended fixed-price ask for one unique asset.
    #[must_use]
    pub fn dummy_fixed(maker: Address, collection: Address, token_id: u128, price: u128) -> Self {
        Self {
            maker,
            collection,
            token_id,
            quantity: 1,
            currency: Address::ZERO,
            price,
            start: 0,
            end: 0,
            salt: rand::random::<u128>(),
            nonce: 1,
            standard: AssetKind::Unique,
            strategy: PricingStrategy::FixedPrice,
        }
    }

    /// A multi-edition ask offering `quantity` units.
    #[must_use]
    pub fn dummy_edition(
        maker: Address,
        collection: Address,
        token_id: u128,
        price: u128,
        quantity: u64,
    ) -> Self {
        Self {
            quantity,
            standard: AssetKind::MultiEdition,
            ..Self::dummy_fixed(maker, collection, token_id, price)
        }
    }
}
