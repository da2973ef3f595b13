//! Matching engine module.
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - Within a price, orders fill strictly oldest first
//! - Every fill executes at the resting order's price
//! - **Partial fills** are supported; unfilled quantity rests on the book
//! - Invalid requests are rejected before any state changes
//!
//! ## Example
//!
//! ```
//! use limit_book::engine::MatchingEngine;
//! use limit_book::types::OrderRequest;
//!
//! let mut engine = MatchingEngine::new();
//! engine.process_order(OrderRequest::parse("sell", "100", "5").unwrap()).unwrap();
//! engine.process_order(OrderRequest::parse("sell", "100", "10").unwrap()).unwrap();
//!
//! let result = engine.process_order(OrderRequest::parse("buy", "100", "12").unwrap()).unwrap();
//! assert_eq!(result.trades.len(), 2);
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.asks[0].total_quantity, 300_000_000); // 3.0 left
//! assert!(snapshot.bids.is_empty());
//! ```

pub mod matcher;
pub mod shared;

pub use matcher::{MatchResult, MatchingEngine};
pub use shared::SharedEngine;
