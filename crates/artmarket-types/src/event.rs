//! Append-only settlement and cancellation records.
//!
//! Every successful fill or cancel produces one immutable record. They are
//! the audit trail consumed by external indexers; the engine never reads
//! them back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, OrderHash};

/// Emitted once per successful fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilled {
    /// Canonical hash of the filled ask.
    pub order_hash: OrderHash,
    pub collection: Address,
    pub token_id: u128,
    pub maker: Address,
    pub taker: Address,
    /// Units actually transferred.
    pub taker_quantity: u64,
    pub currency: Address,
    /// `price * taker_quantity`, in the currency's smallest denomination.
    pub total_price: u128,
    pub royalty_amount: u128,
    pub platform_fee: u128,
    pub filled_at: DateTime<Utc>,
}

impl OrderFilled {
    /// What the seller received after both deductions.
    #[must_use]
    pub fn seller_proceeds(&self) -> u128 {
        self.total_price - self.platform_fee - self.royalty_amount
    }
}

/// Emitted once per explicit cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub maker: Address,
    pub nonce: u64,
    pub cancelled_at: DateTime<Utc>,
}

/// A single entry in the engine's event journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    Filled(OrderFilled),
    Cancelled(OrderCancelled),
}
