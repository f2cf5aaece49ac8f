//! Trade execution types
//!
//! A trade is recorded on each side of a match. Every order keeps only the
//! trades applied to itself, each naming the *other* order as counterparty.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// One fill as seen from a single order
///
/// The price is always the resting order's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(rename = "orderId")]
    pub counterparty_order_id: OrderId,
    pub amount: Quantity,
    pub price: Price,
}

impl Trade {
    pub fn new(counterparty_order_id: OrderId, amount: Quantity, price: Price) -> Self {
        Self {
            counterparty_order_id,
            amount,
            price,
        }
    }
}
