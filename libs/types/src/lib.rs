//! Types library for the order matching core
//!
//! Core type definitions shared by the matching engine and the gateway.
//! Nothing in here locks, allocates ids on its own, or performs I/O.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId) and asset symbols
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `order`: Order lifecycle types
//! - `trade`: Trade execution types
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod errors;
