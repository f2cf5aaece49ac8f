//! Matching engine core
//!
//! Main coordinator for order books, the order index and matching logic.
//!
//! Books are sharded per asset, each behind its own mutex. The whole
//! match-and-insert sequence for one submission runs under that mutex, so
//! two submissions for the same asset never interleave while unrelated
//! assets proceed in parallel. Lookups read the id index and take no book
//! lock.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};
use types::errors::{EngineError, OrderError};
use types::ids::{Asset, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{NewOrder, Order, OrderRequest, OrderSnapshot, Side};

use crate::book::{OrderBook, PriceLevel};
use crate::matching::MatchExecutor;

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Remove price levels as soon as their queue empties. When off, empty
    /// levels are left in place and skipped during matching.
    pub prune_empty_levels: bool,
    /// First value of the fill sequence
    pub starting_sequence: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prune_empty_levels: true,
            starting_sequence: 1,
        }
    }
}

/// Main matching engine
pub struct MatchingEngine {
    config: EngineConfig,
    /// Order books per asset
    books: DashMap<Asset, Arc<Mutex<OrderBook>>>,
    /// Latest snapshot of every order ever submitted
    orders: DashMap<OrderId, OrderSnapshot>,
    /// Trade executor with sequence generation
    executor: MatchExecutor,
}

impl MatchingEngine {
    /// Create a new matching engine
    pub fn new(config: EngineConfig) -> Self {
        info!(
            prune_empty_levels = config.prune_empty_levels,
            starting_sequence = config.starting_sequence,
            "MatchingEngine initialized"
        );

        Self {
            executor: MatchExecutor::new(config.starting_sequence),
            books: DashMap::new(),
            orders: DashMap::new(),
            config,
        }
    }

    /// Create a new matching engine with default configuration
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Validate and submit an order
    ///
    /// Fails with a validation error before any book is touched.
    pub fn submit(&self, request: OrderRequest) -> Result<OrderSnapshot, EngineError> {
        let order = NewOrder::try_from(request)?;
        Ok(self.submit_order(order))
    }

    /// Submit a validated order to the matching engine
    ///
    /// Assigns a fresh id, matches against the opposite side in
    /// price-time priority, rests any remainder, records every touched
    /// order in the index and returns the incoming order's final state.
    pub fn submit_order(&self, new_order: NewOrder) -> OrderSnapshot {
        let book = self.book_for(new_order.asset());
        let mut book = book.lock();

        let mut order = new_order.into_order(OrderId::new());
        info!(
            order_id = %order.id(),
            asset = %order.asset(),
            side = ?order.side(),
            price = %order.price(),
            amount = %order.amount(),
            "Order accepted"
        );

        let touched = match order.side() {
            Side::BUY => self.sweep(book.asks.levels_by_priority_mut(), &mut order),
            Side::SELL => self.sweep(book.bids.levels_by_priority_mut(), &mut order),
        };

        if self.config.prune_empty_levels {
            book.prune_empty_levels();
        }

        let snapshot = order.snapshot();
        if order.is_fully_executed() {
            info!(
                order_id = %snapshot.id,
                trades = snapshot.trades.len(),
                "Order filled"
            );
        } else {
            info!(
                order_id = %snapshot.id,
                trades = snapshot.trades.len(),
                pending = %snapshot.pending_amount,
                "Order resting"
            );
            book.insert(order);
        }

        // Still under the book lock: index writes for this asset are
        // ordered the same way as the matches that produced them.
        for resting in touched {
            self.orders.insert(resting.id, resting);
        }
        self.orders.insert(snapshot.id, snapshot.clone());

        snapshot
    }

    /// Walk opposing levels best price first, oldest order first, until
    /// the incoming order is filled or prices stop crossing.
    ///
    /// Returns snapshots of every resting order that received a fill.
    fn sweep<'a, I>(&self, levels: I, incoming: &mut Order) -> Vec<OrderSnapshot>
    where
        I: Iterator<Item = (&'a Price, &'a mut PriceLevel)>,
    {
        let mut touched = Vec::new();

        for (price, level) in levels {
            if incoming.is_fully_executed() || !incoming.crosses(*price) {
                break;
            }

            level.match_fifo(|resting| {
                if !incoming.can_match(resting) {
                    return true;
                }

                let fill = self.executor.execute(incoming, resting);
                debug!(
                    sequence = fill.sequence,
                    incoming = %fill.incoming_order_id,
                    resting = %fill.resting_order_id,
                    amount = %fill.amount,
                    price = %fill.price,
                    "Fill executed"
                );

                touched.push(resting.snapshot());
                !incoming.is_fully_executed()
            });
        }

        touched
    }

    /// Look up an order by its string identifier
    ///
    /// An identifier that does not parse is reported the same way as an
    /// unknown one.
    pub fn lookup(&self, order_id: &str) -> Result<OrderSnapshot, EngineError> {
        let not_found = || OrderError::NotFound {
            order_id: order_id.to_string(),
        };

        let id: OrderId = order_id.parse().map_err(|_| not_found())?;
        let snapshot = self.get(id).ok_or_else(not_found)?;
        Ok(snapshot)
    }

    /// Look up an order by id
    pub fn get(&self, order_id: OrderId) -> Option<OrderSnapshot> {
        self.orders.get(&order_id).map(|entry| entry.value().clone())
    }

    /// Number of orders ever submitted
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Assets that have a book
    pub fn assets(&self) -> Vec<Asset> {
        let mut assets: Vec<Asset> = self.books.iter().map(|entry| entry.key().clone()).collect();
        assets.sort();
        assets
    }

    /// Best (highest) bid for an asset
    pub fn best_bid(&self, asset: &str) -> Option<(Price, Quantity)> {
        self.with_book(asset, |book| book.bids().best_bid()).flatten()
    }

    /// Best (lowest) ask for an asset
    pub fn best_ask(&self, asset: &str) -> Option<(Price, Quantity)> {
        self.with_book(asset, |book| book.asks().best_ask()).flatten()
    }

    /// Aggregated pending quantity of the top `levels` prices, best first
    pub fn depth(&self, asset: &str, side: Side, levels: usize) -> Vec<(Price, Quantity)> {
        self.with_book(asset, |book| match side {
            Side::BUY => book.bids().depth_snapshot(levels),
            Side::SELL => book.asks().depth_snapshot(levels),
        })
        .unwrap_or_default()
    }

    /// Number of resting orders for an asset, both sides
    pub fn resting_count(&self, asset: &str) -> usize {
        self.with_book(asset, OrderBook::resting_count).unwrap_or(0)
    }

    /// Number of price levels held for one side of an asset, empty ones included
    pub fn level_count(&self, asset: &str, side: Side) -> usize {
        self.with_book(asset, |book| match side {
            Side::BUY => book.bids().level_count(),
            Side::SELL => book.asks().level_count(),
        })
        .unwrap_or(0)
    }

    fn with_book<R>(&self, asset: &str, f: impl FnOnce(&OrderBook) -> R) -> Option<R> {
        let asset = Asset::try_new(asset)?;
        let book = self.books.get(asset.as_str())?.value().clone();
        let guard = book.lock();
        Some(f(&guard))
    }

    /// Get or create the book for an asset
    ///
    /// The map guard is released before the caller locks the book.
    fn book_for(&self, asset: &Asset) -> Arc<Mutex<OrderBook>> {
        if let Some(book) = self.books.get(asset.as_str()) {
            return book.value().clone();
        }
        self.books
            .entry(asset.clone())
            .or_insert_with(|| {
                debug!(asset = %asset, "Creating order book");
                Arc::new(Mutex::new(OrderBook::new(asset.clone())))
            })
            .value()
            .clone()
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
