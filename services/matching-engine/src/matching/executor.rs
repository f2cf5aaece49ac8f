//! Trade execution logic
//!
//! Turns one incoming/resting pairing into a pair of trades and applies
//! them to both orders.

use std::sync::atomic::{AtomicU64, Ordering};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;
use types::trade::Trade;

/// Record of a single match between two orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    /// Engine-wide fill sequence, strictly increasing
    pub sequence: u64,
    pub incoming_order_id: OrderId,
    pub resting_order_id: OrderId,
    pub amount: Quantity,
    /// Execution price (always the resting order's price)
    pub price: Price,
}

/// Match executor for handling trade generation
///
/// Shared by all asset books; only the sequence counter is shared state.
#[derive(Debug)]
pub struct MatchExecutor {
    sequence_counter: AtomicU64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: AtomicU64::new(starting_sequence),
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&self) -> u64 {
        self.sequence_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Execute a fill between an incoming order and a resting order
    ///
    /// Matched amount is the smaller of the two pending amounts; the price
    /// is the resting order's. Each order receives a trade naming the
    /// other as counterparty. The caller has already checked `can_match`.
    pub fn execute(&self, incoming: &mut Order, resting: &mut Order) -> Fill {
        let amount = incoming.pending_amount().min(resting.pending_amount());
        let price = resting.price();

        incoming.apply_trade(Trade::new(resting.id(), amount, price));
        resting.apply_trade(Trade::new(incoming.id(), amount, price));

        Fill {
            sequence: self.next_sequence(),
            incoming_order_id: incoming.id(),
            resting_order_id: resting.id(),
            amount,
            price,
        }
    }
}

impl Default for MatchExecutor {
    fn default() -> Self {
        Self::new(0)
    }
}
