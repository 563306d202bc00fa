//! The atomic transfer seam between the engine and the host ledger.
//!
//! The engine never narrates individual transfers: it assembles every asset
//! and fund movement of a fill (or a whole batch) into one
//! [`SettlementPlan`] and hands it to a [`SettlementLedger`], which must
//! apply it all-or-nothing. On the host chain that atomicity comes from
//! transaction semantics; the in-process [`MemoryLedger`] reproduces it by
//! staging every leg before committing.

use std::collections::HashMap;

use artmarket_types::{Address, MarketError, Result};

/// Move `quantity` units of `(collection, token_id)` from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetLeg {
    pub collection: Address,
    pub token_id: u128,
    pub from: Address,
    pub to: Address,
    pub quantity: u64,
}

/// Move `amount` of `currency` from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundLeg {
    pub currency: Address,
    pub from: Address,
    pub to: Address,
    pub amount: u128,
}

/// Every state change of one fill (or one batch), in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    pub asset_legs: Vec<AssetLeg>,
    pub fund_legs: Vec<FundLeg>,
}

impl SettlementPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_asset(&mut self, leg: AssetLeg) {
        self.asset_legs.push(leg);
    }

    /// Zero-amount legs are dropped; a missing royalty entry settles as
    /// zero royalty and must not produce a transfer to nowhere.
    pub fn push_fund(&mut self, leg: FundLeg) {
        if leg.amount > 0 {
            self.fund_legs.push(leg);
        }
    }

    /// Append another plan's legs (batch aggregation).
    pub fn merge(&mut self, other: SettlementPlan) {
        self.asset_legs.extend(other.asset_legs);
        self.fund_legs.extend(other.fund_legs);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asset_legs.is_empty() && self.fund_legs.is_empty()
    }
}

/// Executes settlement plans atomically and answers balance reads.
pub trait SettlementLedger {
    /// Apply every leg of the plan, or none of them.
    ///
    /// # Errors
    /// Any leg failure (insufficient holdings, overflow) aborts the whole
    /// plan and must leave the ledger untouched.
    fn execute(&mut self, plan: &SettlementPlan) -> Result<()>;

    /// Units of `(collection, token_id)` held by `owner`.
    fn asset_balance(&self, collection: Address, token_id: u128, owner: Address) -> u64;

    /// Amount of `currency` held by `owner`.
    fn funds_balance(&self, currency: Address, owner: Address) -> u128;
}

/// In-process ledger standing in for the host chain's balances.
///
/// `execute` stages all legs on copies of the balance maps and swaps them
/// in only when every leg applied cleanly, so a failed plan leaves no
/// partial state.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    /// (collection, token_id, owner) -> units held.
    assets: HashMap<(Address, u128, Address), u64>,
    /// (currency, owner) -> amount held.
    funds: HashMap<(Address, Address), u128>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an owner with freshly minted units of an asset.
    pub fn mint_asset(&mut self, collection: Address, token_id: u128, owner: Address, quantity: u64) {
        *self.assets.entry((collection, token_id, owner)).or_insert(0) += quantity;
    }

    /// Credit an owner with funds in the given currency.
    pub fn deposit(&mut self, currency: Address, owner: Address, amount: u128) {
        *self.funds.entry((currency, owner)).or_insert(0) += amount;
    }

    fn apply_asset_leg(
        assets: &mut HashMap<(Address, u128, Address), u64>,
        leg: &AssetLeg,
    ) -> Result<()> {
        let from_key = (leg.collection, leg.token_id, leg.from);
        let held = assets.get(&from_key).copied().unwrap_or(0);
        if held < leg.quantity {
            return Err(MarketError::InsufficientAsset {
                collection: leg.collection,
                token_id: leg.token_id,
                owner: leg.from,
                held,
                needed: leg.quantity,
            });
        }
        assets.insert(from_key, held - leg.quantity);

        let to_key = (leg.collection, leg.token_id, leg.to);
        let to_held = assets.get(&to_key).copied().unwrap_or(0);
        let updated = to_held
            .checked_add(leg.quantity)
            .ok_or(MarketError::AmountOverflow)?;
        assets.insert(to_key, updated);
        Ok(())
    }

    fn apply_fund_leg(funds: &mut HashMap<(Address, Address), u128>, leg: &FundLeg) -> Result<()> {
        let from_key = (leg.currency, leg.from);
        let available = funds.get(&from_key).copied().unwrap_or(0);
        if available < leg.amount {
            return Err(MarketError::InsufficientFunds {
                needed: leg.amount,
                available,
            });
        }
        funds.insert(from_key, available - leg.amount);

        let to_key = (leg.currency, leg.to);
        let to_held = funds.get(&to_key).copied().unwrap_or(0);
        let updated = to_held
            .checked_add(leg.amount)
            .ok_or(MarketError::AmountOverflow)?;
        funds.insert(to_key, updated);
        Ok(())
    }
}

impl SettlementLedger for MemoryLedger {
    fn execute(&mut self, plan: &SettlementPlan) -> Result<()> {
        // Stage on copies; commit only if every leg applies.
        let mut assets = self.assets.clone();
        let mut funds = self.funds.clone();

        for leg in &plan.asset_legs {
            Self::apply_asset_leg(&mut assets, leg)?;
        }
        for leg in &plan.fund_legs {
            Self::apply_fund_leg(&mut funds, leg)?;
        }

        self.assets = assets;
        self.funds = funds;
        Ok(())
    }

    fn asset_balance(&self, collection: Address, token_id: u128, owner: Address) -> u64 {
        self.assets
            .get(&(collection, token_id, owner))
            .copied()
            .unwrap_or(0)
    }

    fn funds_balance(&self, currency: Address, owner: Address) -> u128 {
        self.funds.get(&(currency, owner)).copied().unwrap_or(0)
    }
}
