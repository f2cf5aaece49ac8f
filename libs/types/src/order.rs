//! Order lifecycle types
//!
//! An order moves through three shapes:
//! - [`OrderRequest`]: raw caller input, nothing checked yet
//! - [`NewOrder`]: validated, timestamped, but without an identifier
//! - [`Order`]: identified by the engine and mutated only by fills
//!
//! [`OrderSnapshot`] is the read-only copy handed back across the boundary.

use crate::errors::ValidationError;
use crate::ids::{Asset, OrderId};
use crate::numeric::{Price, Quantity};
use crate::trade::Trade;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

/// Execution state, derived from the pending amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Nothing matched yet
    Pending,
    /// Partially matched
    Partial,
    /// Completely matched (terminal)
    Filled,
}

impl OrderStatus {
    fn derive(pending_amount: Quantity, trades: &[Trade]) -> Self {
        if pending_amount.is_zero() {
            OrderStatus::Filled
        } else if trades.is_empty() {
            OrderStatus::Pending
        } else {
            OrderStatus::Partial
        }
    }
}

/// Unvalidated order input as received from a caller
///
/// Every field may be absent; `NewOrder::try_from` reports the first one
/// that is missing or out of range.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderRequest {
    pub asset: Option<String>,
    pub price: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub direction: Option<Side>,
}

impl OrderRequest {
    pub fn new(asset: impl Into<String>, price: Decimal, amount: Decimal, direction: Side) -> Self {
        Self {
            asset: Some(asset.into()),
            price: Some(price),
            amount: Some(amount),
            direction: Some(direction),
        }
    }
}

/// A validated order that has not been submitted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    asset: Asset,
    price: Price,
    amount: Quantity,
    side: Side,
    created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Validate and timestamp a new order
    pub fn new(
        asset: &str,
        price: Decimal,
        amount: Decimal,
        side: Side,
    ) -> Result<Self, ValidationError> {
        Ok(Self::stamped(
            validate_asset(asset)?,
            validate_price(price)?,
            validate_amount(amount)?,
            side,
        ))
    }

    fn stamped(asset: Asset, price: Price, amount: Quantity, side: Side) -> Self {
        Self {
            asset,
            price,
            amount,
            side,
            created_at: Utc::now(),
        }
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Attach the engine-assigned identifier
    pub fn into_order(self, order_id: OrderId) -> Order {
        Order {
            order_id,
            created_at: self.created_at,
            asset: self.asset,
            price: self.price,
            amount: self.amount,
            side: self.side,
            pending_amount: self.amount,
            trades: Vec::new(),
        }
    }
}

impl TryFrom<OrderRequest> for NewOrder {
    type Error = ValidationError;

    /// Fields are checked in order: asset, price, amount, direction.
    fn try_from(request: OrderRequest) -> Result<Self, Self::Error> {
        let asset = request
            .asset
            .ok_or_else(|| required("asset"))
            .and_then(|asset| validate_asset(&asset))?;
        let price = request
            .price
            .ok_or_else(|| required("price"))
            .and_then(validate_price)?;
        let amount = request
            .amount
            .ok_or_else(|| required("amount"))
            .and_then(validate_amount)?;
        let side = request
            .direction
            .ok_or_else(|| ValidationError::new("direction", "must be BUY or SELL"))?;

        Ok(Self::stamped(asset, price, amount, side))
    }
}

fn required(field: &'static str) -> ValidationError {
    ValidationError::new(field, "is required")
}

fn validate_asset(asset: &str) -> Result<Asset, ValidationError> {
    Asset::try_new(asset).ok_or_else(|| ValidationError::new("asset", "must not be empty"))
}

fn validate_price(price: Decimal) -> Result<Price, ValidationError> {
    Price::try_new(price).ok_or_else(|| ValidationError::new("price", "must be greater than zero"))
}

fn validate_amount(amount: Decimal) -> Result<Quantity, ValidationError> {
    Quantity::try_new(amount)
        .filter(|q| !q.is_zero())
        .ok_or_else(|| ValidationError::new("amount", "must be greater than zero"))
}

/// A submitted order
///
/// Invariants:
/// - `0 <= pending_amount <= amount`, and pending never grows
/// - fully executed exactly when pending is zero
/// - `trades` grows by one per match, in fill order
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    order_id: OrderId,
    created_at: DateTime<Utc>,
    asset: Asset,
    price: Price,
    amount: Quantity,
    side: Side,
    pending_amount: Quantity,
    trades: Vec<Trade>,
}

impl Order {
    pub fn id(&self) -> OrderId {
        self.order_id
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn amount(&self) -> Quantity {
        self.amount
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn pending_amount(&self) -> Quantity {
        self.pending_amount
    }

    pub fn filled_amount(&self) -> Quantity {
        self.amount.saturating_sub(self.pending_amount)
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Check whether a counter-order at `price` is acceptable
    ///
    /// A BUY accepts sellers at or below its price, a SELL accepts buyers
    /// at or above.
    pub fn crosses(&self, price: Price) -> bool {
        match self.side {
            Side::BUY => self.price >= price,
            Side::SELL => self.price <= price,
        }
    }

    /// Check whether `other` is an acceptable counter-order
    ///
    /// Same asset, opposite side, and crossing prices.
    pub fn can_match(&self, other: &Order) -> bool {
        self.asset == other.asset && self.side != other.side && self.crosses(other.price)
    }

    /// Record a fill against this order
    ///
    /// The caller guarantees `trade.amount <= pending_amount`.
    pub fn apply_trade(&mut self, trade: Trade) {
        debug_assert!(
            trade.amount <= self.pending_amount,
            "Fill would exceed pending amount"
        );
        self.pending_amount = self.pending_amount.saturating_sub(trade.amount);
        self.trades.push(trade);
    }

    pub fn is_fully_executed(&self) -> bool {
        self.pending_amount.is_zero()
    }

    pub fn status(&self) -> OrderStatus {
        OrderStatus::derive(self.pending_amount, &self.trades)
    }

    /// Check quantity invariant: filled + pending = amount
    pub fn check_invariant(&self) -> bool {
        let traded: Decimal = self.trades.iter().map(|t| t.amount.as_decimal()).sum();
        self.pending_amount <= self.amount
            && traded + self.pending_amount.as_decimal() == self.amount.as_decimal()
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot::from(self)
    }
}

/// Point-in-time copy of an order, as returned by submit and lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub timestamp: DateTime<Utc>,
    pub asset: Asset,
    pub price: Price,
    pub amount: Quantity,
    pub direction: Side,
    pub pending_amount: Quantity,
    pub trades: Vec<Trade>,
}

impl OrderSnapshot {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::derive(self.pending_amount, &self.trades)
    }
}

impl From<&Order> for OrderSnapshot {
    fn from(order: &Order) -> Self {
        Self {
            id: order.order_id,
            timestamp: order.created_at,
            asset: order.asset.clone(),
            price: order.price,
            amount: order.amount,
            direction: order.side,
            pending_amount: order.pending_amount,
            trades: order.trades.clone(),
        }
    }
}
