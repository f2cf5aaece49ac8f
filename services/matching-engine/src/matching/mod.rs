//! Matching logic module
//!
//! Fill execution for price-time priority matching. Price compatibility
//! lives on `Order::crosses`.

pub mod executor;

pub use executor::{Fill, MatchExecutor};
