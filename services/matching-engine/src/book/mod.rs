//! Order book infrastructure module
//!
//! Contains price levels, bid book, and ask book implementations, and the
//! per-asset pairing of the two sides.

pub mod price_level;
pub mod bid_book;
pub mod ask_book;

pub use price_level::PriceLevel;
pub use bid_book::BidBook;
pub use ask_book::AskBook;

use types::ids::Asset;
use types::order::{Order, Side};

/// Both sides of the book for a single asset
#[derive(Debug, Clone)]
pub struct OrderBook {
    asset: Asset,
    pub(crate) bids: BidBook,
    pub(crate) asks: AskBook,
}

impl OrderBook {
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            bids: BidBook::new(),
            asks: AskBook::new(),
        }
    }

    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    /// Rest an order on its own side of the book
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.asset(), &self.asset);
        match order.side() {
            Side::BUY => self.bids.insert(order),
            Side::SELL => self.asks.insert(order),
        }
    }

    /// Drop emptied price levels on both sides
    pub fn prune_empty_levels(&mut self) -> usize {
        self.bids.prune_empty_levels() + self.asks.prune_empty_levels()
    }

    /// Number of resting orders on both sides
    pub fn resting_count(&self) -> usize {
        self.bids.order_count() + self.asks.order_count()
    }
}
