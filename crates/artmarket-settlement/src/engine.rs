//! The settlement engine: fill, batch fill, cancel, and the admin surface.
//!
//! One engine instance owns the mutable marketplace state (nonce registry,
//! currency allowlist, fee configuration, event journal). The ledger and
//! royalty oracle are injected per call, so the engine itself stays free of
//! ambient globals and can be driven against any ledger implementation.
//!
//! ## Nonce consumption
//!
//! A fill consumes the entire `(maker, nonce)` pair even when
//! `taker_quantity < ask.quantity` on a multi-edition ask. The remainder of
//! a partially-filled ask is therefore unsellable without a fresh signed
//! order. This mirrors the deployed contract's observed behavior; partial
//! fill accounting was intentionally not added here.

use std::collections::HashSet;

use chrono::Utc;

use artmarket_codec::{hash_ask, verify_ask, AskSignature, SignDomain};
use artmarket_types::{
    split_fees, Address, Ask, FeeSplit, MarketError, MarketEvent, MarketplaceConfig,
    OrderCancelled, OrderFilled, OrderHash, PricingStrategy, Result,
};

use crate::{
    AssetLeg, CurrencyAllowlist, FundLeg, NonceRegistry, RoyaltyOracle, SettlementLedger,
    SettlementPlan,
};

/// A fully validated fill, ready to execute. All checks that produced it
/// were side-effect-free.
struct PreparedFill {
    order_hash: OrderHash,
    split: FeeSplit,
    /// Native value this fill requires from the caller (0 for token asks).
    native_due: u128,
    plan: SettlementPlan,
}

/// The order settlement state machine.
pub struct SettlementEngine {
    domain: SignDomain,
    config: MarketplaceConfig,
    nonces: NonceRegistry,
    currencies: CurrencyAllowlist,
    events: Vec<MarketEvent>,
}

impl SettlementEngine {
    #[must_use]
    pub fn new(domain: SignDomain, config: MarketplaceConfig) -> Self {
        Self {
            domain,
            config,
            nonces: NonceRegistry::new(),
            currencies: CurrencyAllowlist::new(),
            events: Vec::new(),
        }
    }

    // =====================================================================
    // Settlement entry points
    // =====================================================================

    /// Fill a single signed ask.
    ///
    /// `attached_value` is the native currency supplied with the call; it
    /// must equal `price * taker_quantity` exactly for native asks and be
    /// zero for token-currency asks.
    ///
    /// # Errors
    /// Any failed check aborts with no state change; see the crate docs for
    /// the validation order.
    pub fn fill<L: SettlementLedger, R: RoyaltyOracle>(
        &mut self,
        ledger: &mut L,
        royalties: &R,
        ask: &Ask,
        signature: &AskSignature,
        taker: Address,
        taker_quantity: u64,
        attached_value: u128,
    ) -> Result<OrderFilled> {
        let now = unix_now();
        let prepared = self.prepare_fill(royalties, ask, signature, taker, taker_quantity, now)?;

        if attached_value != prepared.native_due {
            return Err(MarketError::IncorrectValue {
                expected: prepared.native_due,
                supplied: attached_value,
            });
        }

        ledger.execute(&prepared.plan)?;
        self.nonces.consume(ask.maker, ask.nonce)?;

        let record = self.journal_fill(ask, taker, taker_quantity, &prepared);
        Ok(record)
    }

    /// Fill several independent asks in one call.
    ///
    /// The caller attaches the sum of all native-currency totals; the batch
    /// settles atomically, so one bad order fails every order in it.
    pub fn fill_many<L: SettlementLedger, R: RoyaltyOracle>(
        &mut self,
        ledger: &mut L,
        royalties: &R,
        asks: &[Ask],
        signatures: &[AskSignature],
        taker_quantities: &[u64],
        taker: Address,
        attached_value: u128,
    ) -> Result<Vec<OrderFilled>> {
        if asks.len() != signatures.len() || asks.len() != taker_quantities.len() {
            return Err(MarketError::LengthMismatch {
                asks: asks.len(),
                signatures: signatures.len(),
                quantities: taker_quantities.len(),
            });
        }

        let now = unix_now();
        let mut batch_nonces: HashSet<(Address, u64)> = HashSet::new();
        let mut combined = SettlementPlan::new();
        let mut native_sum: u128 = 0;
        let mut prepared_fills = Vec::with_capacity(asks.len());

        for ((ask, signature), &quantity) in
            asks.iter().zip(signatures).zip(taker_quantities)
        {
            // Two orders reusing one nonce inside the same batch race the
            // same way two transactions would: the second one loses.
            if !batch_nonces.insert((ask.maker, ask.nonce)) {
                return Err(MarketError::NonceUsed {
                    maker: ask.maker,
                    nonce: ask.nonce,
                });
            }

            let prepared = self.prepare_fill(royalties, ask, signature, taker, quantity, now)?;
            native_sum = native_sum
                .checked_add(prepared.native_due)
                .ok_or(MarketError::AmountOverflow)?;
            combined.merge(prepared.plan.clone());
            prepared_fills.push(prepared);
        }

        if attached_value != native_sum {
            return Err(MarketError::IncorrectValue {
                expected: native_sum,
                supplied: attached_value,
            });
        }

        ledger.execute(&combined)?;

        let mut records = Vec::with_capacity(prepared_fills.len());
        for (prepared, (ask, &quantity)) in prepared_fills
            .iter()
            .zip(asks.iter().zip(taker_quantities))
        {
            self.nonces.consume(ask.maker, ask.nonce)?;
            records.push(self.journal_fill(ask, taker, quantity, prepared));
        }
        Ok(records)
    }

    /// Pre-emptively invalidate a nonce. The caller is the maker.
    ///
    /// # Errors
    /// [`MarketError::NonceUsed`] if the nonce was already consumed by a
    /// fill or an earlier cancel — cancellation is not a no-op on settled
    /// orders.
    pub fn cancel(&mut self, caller: Address, nonce: u64) -> Result<OrderCancelled> {
        self.nonces.consume(caller, nonce)?;
        let record = OrderCancelled {
            maker: caller,
            nonce,
            cancelled_at: Utc::now(),
        };
        self.events.push(MarketEvent::Cancelled(record));
        tracing::info!(maker = %caller, nonce, "order cancelled");
        Ok(record)
    }

    // =====================================================================
    // Read-only entry points
    // =====================================================================

    /// Canonical hash of an ask under this engine's domain.
    #[must_use]
    pub fn hash_ask(&self, ask: &Ask) -> OrderHash {
        hash_ask(&self.domain, ask)
    }

    /// Whether a `(maker, nonce)` pair has been consumed.
    #[must_use]
    pub fn nonce_used(&self, maker: Address, nonce: u64) -> bool {
        self.nonces.is_used(maker, nonce)
    }

    #[must_use]
    pub fn platform_fee_bps(&self) -> u16 {
        self.config.platform_fee_bps
    }

    #[must_use]
    pub fn treasury(&self) -> Address {
        self.config.treasury
    }

    #[must_use]
    pub fn currency_allowed(&self, currency: Address) -> bool {
        self.currencies.is_allowed(currency)
    }

    #[must_use]
    pub fn domain(&self) -> &SignDomain {
        &self.domain
    }

    /// The append-only event journal, oldest first.
    #[must_use]
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    // =====================================================================
    // Administrative entry points
    // =====================================================================

    /// Update the platform fee. Admin only; capped.
    pub fn set_platform_fee_bps(&mut self, caller: Address, bps: u16) -> Result<()> {
        self.require_admin(caller)?;
        if let Err(err) = self.config.set_platform_fee_bps(bps) {
            tracing::warn!(bps, "platform fee update rejected");
            return Err(err);
        }
        Ok(())
    }

    /// Update the treasury address. Admin only.
    pub fn set_treasury(&mut self, caller: Address, treasury: Address) -> Result<()> {
        self.require_admin(caller)?;
        self.config.treasury = treasury;
        Ok(())
    }

    /// Enable or disable a payment currency. Admin only.
    pub fn set_currency_allowed(
        &mut self,
        caller: Address,
        currency: Address,
        allowed: bool,
    ) -> Result<()> {
        self.require_admin(caller)?;
        self.currencies.set_allowed(currency, allowed);
        Ok(())
    }

    fn require_admin(&self, caller: Address) -> Result<()> {
        if caller != self.config.admin {
            return Err(MarketError::Unauthorized { caller });
        }
        Ok(())
    }

    // =====================================================================
    // Internals
    // =====================================================================

    /// Run every validation step and assemble the settlement plan.
    /// Side-effect-free: nothing here touches engine or ledger state.
    fn prepare_fill<R: RoyaltyOracle>(
        &self,
        royalties: &R,
        ask: &Ask,
        signature: &AskSignature,
        taker: Address,
        taker_quantity: u64,
        now: u64,
    ) -> Result<PreparedFill> {
        verify_ask(&self.domain, ask, signature)?;

        if self.nonces.is_used(ask.maker, ask.nonce) {
            return Err(MarketError::NonceUsed {
                maker: ask.maker,
                nonce: ask.nonce,
            });
        }

        ask.validate()?;
        if ask.strategy != PricingStrategy::FixedPrice {
            return Err(MarketError::StrategyNotSupported);
        }
        ask.check_window(now)?;
        self.currencies.check(ask.currency)?;

        if taker_quantity == 0 || taker_quantity > ask.quantity {
            return Err(MarketError::InvalidQuantity {
                requested: taker_quantity,
                offered: ask.quantity,
            });
        }

        let total_price = ask.total_price(taker_quantity)?;
        let royalty = royalties.royalty_for(ask.collection, ask.token_id);
        let royalty_bps = royalty.map_or(0, |r| r.bps);
        let split = split_fees(total_price, self.config.platform_fee_bps, royalty_bps)?;

        let mut plan = SettlementPlan::new();
        plan.push_asset(AssetLeg {
            collection: ask.collection,
            token_id: ask.token_id,
            from: ask.maker,
            to: taker,
            quantity: taker_quantity,
        });
        plan.push_fund(FundLeg {
            currency: ask.currency,
            from: taker,
            to: ask.maker,
            amount: split.seller_proceeds,
        });
        if let Some(royalty) = royalty {
            plan.push_fund(FundLeg {
                currency: ask.currency,
                from: taker,
                to: royalty.receiver,
                amount: split.royalty_amount,
            });
        }
        plan.push_fund(FundLeg {
            currency: ask.currency,
            from: taker,
            to: self.config.treasury,
            amount: split.platform_fee,
        });

        Ok(PreparedFill {
            order_hash: hash_ask(&self.domain, ask),
            split,
            native_due: if ask.is_native() { total_price } else { 0 },
            plan,
        })
    }

    /// Record a committed fill in the journal and return the record.
    fn journal_fill(
        &mut self,
        ask: &Ask,
        taker: Address,
        taker_quantity: u64,
        prepared: &PreparedFill,
    ) -> OrderFilled {
        let record = OrderFilled {
            order_hash: prepared.order_hash,
            collection: ask.collection,
            token_id: ask.token_id,
            maker: ask.maker,
            taker,
            taker_quantity,
            currency: ask.currency,
            total_price: prepared.split.total_price,
            royalty_amount: prepared.split.royalty_amount,
            platform_fee: prepared.split.platform_fee,
            filled_at: Utc::now(),
        };
        self.events.push(MarketEvent::Filled(record.clone()));
        tracing::info!(
            order = %prepared.order_hash.short(),
            maker = %ask.maker.short(),
            taker = %taker.short(),
            total = prepared.split.total_price,
            "order filled"
        );
        record
    }
}

/// Current unix time in seconds, the settlement clock.
fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use artmarket_codec::MakerKey;
    use artmarket_types::constants;

    use crate::{MemoryLedger, RoyaltyRegistry};

    use super::*;

    const ADMIN: Address = Address([0xadu8; 20]);
    const TREASURY: Address = Address([0xfeu8; 20]);
    const COLLECTION: Address = Address([2u8; 20]);

    fn make_engine() -> SettlementEngine {
        let domain = SignDomain::artmarket(constants::DEFAULT_CHAIN_ID, Address([0xcc; 20]));
        SettlementEngine::new(domain, MarketplaceConfig::new(ADMIN, TREASURY))
    }

    fn funded_fill_setup(price: u128) -> (SettlementEngine, MemoryLedger, MakerKey, Address, Ask) {
        let engine = make_engine();
        let maker = MakerKey::from_bytes(&[7u8; 32]);
        let taker = Address([9u8; 20]);

        let mut ledger = MemoryLedger::new();
        ledger.mint_asset(COLLECTION, 1, maker.address(), 1);
        ledger.deposit(Address::ZERO, taker, price);

        let ask = Ask::dummy_fixed(maker.address(), COLLECTION, 1, price);
        (engine, ledger, maker, taker, ask)
    }

    #[test]
    fn admin_can_update_fee_and_treasury() {
        let mut engine = make_engine();
        engine.set_platform_fee_bps(ADMIN, 300).unwrap();
        assert_eq!(engine.platform_fee_bps(), 300);

        let new_treasury = Address([0x77; 20]);
        engine.set_treasury(ADMIN, new_treasury).unwrap();
        assert_eq!(engine.treasury(), new_treasury);
    }

    #[test]
    fn non_admin_rejected() {
        let mut engine = make_engine();
        let stranger = Address([0x01; 20]);
        let err = engine.set_platform_fee_bps(stranger, 300).unwrap_err();
        assert!(matches!(err, MarketError::Unauthorized { .. }));
        assert_eq!(engine.platform_fee_bps(), 200);

        let err = engine.set_treasury(stranger, stranger).unwrap_err();
        assert!(matches!(err, MarketError::Unauthorized { .. }));

        let err = engine
            .set_currency_allowed(stranger, Address([5u8; 20]), true)
            .unwrap_err();
        assert!(matches!(err, MarketError::Unauthorized { .. }));
    }

    #[test]
    fn fee_cap_enforced() {
        let mut engine = make_engine();
        let err = engine.set_platform_fee_bps(ADMIN, 1_001).unwrap_err();
        assert!(matches!(err, MarketError::FeeTooHigh { .. }));
        assert_eq!(engine.platform_fee_bps(), 200);
    }

    #[test]
    fn native_currency_allowed_by_default() {
        let engine = make_engine();
        assert!(engine.currency_allowed(Address::ZERO));
        assert!(!engine.currency_allowed(Address([5u8; 20])));
    }

    #[test]
    fn auction_strategy_rejected() {
        let (mut engine, mut ledger, maker, taker, mut ask) = funded_fill_setup(1_000);
        ask.strategy = PricingStrategy::Auction;
        let sig = maker.sign_ask(engine.domain(), &ask);

        let err = engine
            .fill(&mut ledger, &RoyaltyRegistry::new(), &ask, &sig, taker, 1, 1_000)
            .unwrap_err();
        assert!(matches!(err, MarketError::StrategyNotSupported));
        assert!(!engine.nonce_used(ask.maker, ask.nonce));
    }

    #[test]
    fn token_currency_fill_requires_zero_attached_value() {
        let token = Address([5u8; 20]);
        let (mut engine, mut ledger, maker, taker, mut ask) = funded_fill_setup(1_000);
        ask.currency = token;
        engine.set_currency_allowed(ADMIN, token, true).unwrap();
        ledger.deposit(token, taker, 1_000);
        let sig = maker.sign_ask(engine.domain(), &ask);

        // Attaching native value to a token-currency fill is an error.
        let err = engine
            .fill(&mut ledger, &RoyaltyRegistry::new(), &ask, &sig, taker, 1, 1_000)
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::IncorrectValue { expected: 0, supplied: 1_000 }
        ));

        // With zero attached value the token balance pays.
        let record = engine
            .fill(&mut ledger, &RoyaltyRegistry::new(), &ask, &sig, taker, 1, 0)
            .unwrap();
        assert_eq!(record.currency, token);
        assert_eq!(ledger.funds_balance(token, maker.address()), 980);
        assert_eq!(ledger.funds_balance(token, TREASURY), 20);
    }

    #[test]
    fn disallowed_currency_rejected() {
        let (mut engine, mut ledger, maker, taker, mut ask) = funded_fill_setup(1_000);
        ask.currency = Address([5u8; 20]);
        let sig = maker.sign_ask(engine.domain(), &ask);

        let err = engine
            .fill(&mut ledger, &RoyaltyRegistry::new(), &ask, &sig, taker, 1, 0)
            .unwrap_err();
        assert!(matches!(err, MarketError::CurrencyNotAllowed(_)));
    }

    #[test]
    fn quantity_bounds_enforced() {
        let (mut engine, mut ledger, maker, taker, ask) = funded_fill_setup(1_000);
        let sig = maker.sign_ask(engine.domain(), &ask);
        let royalties = RoyaltyRegistry::new();

        let err = engine
            .fill(&mut ledger, &royalties, &ask, &sig, taker, 0, 0)
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::InvalidQuantity { requested: 0, offered: 1 }
        ));

        let err = engine
            .fill(&mut ledger, &royalties, &ask, &sig, taker, 2, 2_000)
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::InvalidQuantity { requested: 2, offered: 1 }
        ));
    }

    #[test]
    fn failed_fill_leaves_nonce_unused() {
        let (mut engine, mut ledger, maker, taker, ask) = funded_fill_setup(1_000);
        let sig = maker.sign_ask(engine.domain(), &ask);

        // Wrong attached value.
        let err = engine
            .fill(&mut ledger, &RoyaltyRegistry::new(), &ask, &sig, taker, 1, 999)
            .unwrap_err();
        assert!(matches!(err, MarketError::IncorrectValue { .. }));
        assert!(!engine.nonce_used(ask.maker, ask.nonce));
        assert!(engine.events().is_empty());

        // The same order still fills fine afterwards.
        engine
            .fill(&mut ledger, &RoyaltyRegistry::new(), &ask, &sig, taker, 1, 1_000)
            .unwrap();
        assert!(engine.nonce_used(ask.maker, ask.nonce));
        assert_eq!(engine.events().len(), 1);
    }

    #[test]
    fn hash_ask_matches_codec() {
        let engine = make_engine();
        let ask = Ask::dummy_fixed(Address([1u8; 20]), COLLECTION, 1, 1_000);
        assert_eq!(engine.hash_ask(&ask), hash_ask(engine.domain(), &ask));
    }

    #[test]
    fn cancel_emits_record_and_blocks_fill() {
        let (mut engine, mut ledger, maker, taker, ask) = funded_fill_setup(1_000);
        let sig = maker.sign_ask(engine.domain(), &ask);

        let record = engine.cancel(maker.address(), ask.nonce).unwrap();
        assert_eq!(record.maker, maker.address());
        assert_eq!(record.nonce, ask.nonce);

        let err = engine
            .fill(&mut ledger, &RoyaltyRegistry::new(), &ask, &sig, taker, 1, 1_000)
            .unwrap_err();
        assert!(matches!(err, MarketError::NonceUsed { .. }));
    }

    #[test]
    fn cancel_of_cancelled_nonce_fails() {
        let mut engine = make_engine();
        let maker = Address([1u8; 20]);
        engine.cancel(maker, 5).unwrap();
        let err = engine.cancel(maker, 5).unwrap_err();
        assert!(matches!(err, MarketError::NonceUsed { nonce: 5, .. }));
    }
}
