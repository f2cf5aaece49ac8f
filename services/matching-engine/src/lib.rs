//! Matching Engine Service
//!
//! In-memory continuous limit order book with price-time priority
//! matching, one book per asset.
//!
//! **Key Invariants:**
//! - Better price always matches first; equal prices match oldest first
//! - Trades execute at the resting order's price
//! - Every match produces a pair of trades of equal amount and price
//! - `amount == pending + sum(trade amounts)` for every order
//! - Only orders with a pending amount rest in a book

pub mod book;
pub mod matching;
pub mod engine;

pub use engine::{EngineConfig, MatchingEngine};
