//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders for one asset at one exact
//! price. Orders are kept in FIFO (First-In-First-Out) order to enforce
//! time priority.

use std::collections::VecDeque;
use types::numeric::Quantity;
use types::order::Order;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching. Only orders
/// with a non-zero pending amount stay queued.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
        }
    }

    /// Insert an order at the back of the queue (time priority)
    pub fn push_back(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Visit queued orders oldest first
    ///
    /// `visit` returns `false` to stop the walk. Afterwards every fully
    /// executed order is dropped from the queue; the rest keep their
    /// relative order. Returns how many orders were dropped.
    pub fn match_fifo<F>(&mut self, mut visit: F) -> usize
    where
        F: FnMut(&mut Order) -> bool,
    {
        for order in self.orders.iter_mut() {
            if !visit(order) {
                break;
            }
        }

        let queued = self.orders.len();
        self.orders.retain(|order| !order.is_fully_executed());
        queued - self.orders.len()
    }

    /// Peek at the front order without removing it
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Iterate queued orders oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total pending quantity at this price level
    ///
    /// Saturates at `Decimal::MAX`.
    pub fn total_quantity(&self) -> Quantity {
        self.orders
            .iter()
            .fold(Quantity::zero(), |total, order| total + order.pending_amount())
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
