//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone)]
pub struct AskBook {
    /// Price levels sorted ascending (lowest price first)
    /// Using BTreeMap ensures deterministic iteration
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Append an order to the back of its price level
    pub fn insert(&mut self, order: Order) {
        let level = self.levels.entry(order.price()).or_default();
        level.push_back(order);
    }

    /// Get the best ask (lowest price with resting quantity)
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .find(|(_, level)| !level.is_empty())
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    /// Levels in matching priority for an incoming buy: cheapest first
    pub(crate) fn levels_by_priority_mut(
        &mut self,
    ) -> impl Iterator<Item = (&Price, &mut PriceLevel)> {
        self.levels.iter_mut()
    }

    /// Get depth snapshot (top N non-empty price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .filter(|(_, level)| !level.is_empty())
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Drop price levels whose queue has emptied
    pub fn prune_empty_levels(&mut self) -> usize {
        let before = self.levels.len();
        self.levels.retain(|_, level| !level.is_empty());
        before - self.levels.len()
    }

    /// Check if the ask book has no resting orders
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(PriceLevel::is_empty)
    }

    /// Get the total number of price levels, empty ones included
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }
}

impl Default for AskBook {
    fn default() -> Self {
        Self::new()
    }
}
