//! Error types for the ArtMarket settlement engine.
//!
//! All errors use the `AM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Signature errors
//! - 3xx: Nonce errors
//! - 4xx: Currency / payment errors
//! - 5xx: Settlement / transfer errors
//! - 6xx: Administrative errors
//! - 9xx: General / internal errors
//!
//! Every error is terminal for the current invocation; the engine never
//! retries on behalf of the caller.

use thiserror::Error;

use crate::Address;

/// Central error enum for all ArtMarket operations.
#[derive(Debug, Error)]
pub enum MarketError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The ask failed shape validation (zero price, zero quantity, bad window).
    #[error("AM_ERR_100: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// The fill was attempted before the ask's start time.
    #[error("AM_ERR_101: Order not started: opens at {start}, now {now}")]
    OrderNotStarted { start: u64, now: u64 },

    /// The fill was attempted at or after the ask's end time.
    #[error("AM_ERR_102: Order expired: closed at {end}, now {now}")]
    OrderExpired { end: u64, now: u64 },

    /// Taker quantity is zero or exceeds the offered quantity.
    #[error("AM_ERR_103: Invalid quantity: requested {requested}, offered {offered}")]
    InvalidQuantity { requested: u64, offered: u64 },

    /// The ask carries a pricing strategy the engine does not settle.
    #[error("AM_ERR_104: Pricing strategy not supported")]
    StrategyNotSupported,

    /// Batch arrays of asks, signatures, and quantities differ in length.
    #[error(
        "AM_ERR_105: Length mismatch: {asks} asks, {signatures} signatures, \
         {quantities} quantities"
    )]
    LengthMismatch {
        asks: usize,
        signatures: usize,
        quantities: usize,
    },

    // =================================================================
    // Signature Errors (2xx)
    // =================================================================
    /// The signature is malformed or does not recover to the claimed maker.
    #[error("AM_ERR_200: Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    // =================================================================
    // Nonce Errors (3xx)
    // =================================================================
    /// The `(maker, nonce)` pair was already consumed by a fill or cancel.
    #[error("AM_ERR_300: Nonce {nonce} already used by maker {maker}")]
    NonceUsed { maker: Address, nonce: u64 },

    // =================================================================
    // Currency / Payment Errors (4xx)
    // =================================================================
    /// The ask's currency is not on the accepted list.
    #[error("AM_ERR_400: Currency not allowed: {0}")]
    CurrencyNotAllowed(Address),

    /// Attached native value does not exactly match the computed total.
    #[error("AM_ERR_401: Incorrect value: expected {expected}, supplied {supplied}")]
    IncorrectValue { expected: u128, supplied: u128 },

    // =================================================================
    // Settlement / Transfer Errors (5xx)
    // =================================================================
    /// A collaborator transfer failed; the whole fill aborts.
    #[error("AM_ERR_500: Transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// The maker does not hold enough units of the asset being sold.
    #[error(
        "AM_ERR_501: Insufficient asset: owner {owner} holds {held} of \
         {collection}/{token_id}, needs {needed}"
    )]
    InsufficientAsset {
        collection: Address,
        token_id: u128,
        owner: Address,
        held: u64,
        needed: u64,
    },

    /// The payer does not hold enough of the payment currency.
    #[error("AM_ERR_502: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    /// Integer overflow while computing a price or fee amount.
    #[error("AM_ERR_503: Amount overflow")]
    AmountOverflow,

    // =================================================================
    // Administrative Errors (6xx)
    // =================================================================
    /// A platform-fee update exceeded the hard cap.
    #[error("AM_ERR_600: Fee too high: {bps} bps exceeds cap of {cap} bps")]
    FeeTooHigh { bps: u16, cap: u16 },

    /// A privileged entry point was called by a non-admin address.
    #[error("AM_ERR_601: Unauthorized caller: {caller}")]
    Unauthorized { caller: Address },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Encoding / decoding error (hex parsing, identifier width).
    #[error("AM_ERR_900: Encoding error: {0}")]
    Encoding(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = MarketError::NonceUsed {
            maker: Address([1u8; 20]),
            nonce: 42,
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("AM_ERR_300"), "Got: {msg}");
        assert!(msg.contains("42"));
    }

    #[test]
    fn incorrect_value_display() {
        let err = MarketError::IncorrectValue {
            expected: 1_000,
            supplied: 900,
        };
        let msg = format!("{err}");
        assert!(msg.contains("AM_ERR_401"));
        assert!(msg.contains("1000"));
        assert!(msg.contains("900"));
    }

    #[test]
    fn all_errors_have_am_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(MarketError::InvalidOrder {
                reason: "test".into(),
            }),
            Box::new(MarketError::StrategyNotSupported),
            Box::new(MarketError::InvalidSignature {
                reason: "test".into(),
            }),
            Box::new(MarketError::CurrencyNotAllowed(Address::ZERO)),
            Box::new(MarketError::AmountOverflow),
            Box::new(MarketError::FeeTooHigh { bps: 1_001, cap: 1_000 }),
            Box::new(MarketError::Encoding("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("AM_ERR_"),
                "Error missing AM_ERR_ prefix: {msg}"
            );
        }
    }
}
