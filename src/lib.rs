//! # limit-book
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! ## Architecture
//!
//! - **Types**: Orders, requests, trades, fixed-point prices
//! - **OrderBook**: Bid/ask ledgers over slab-backed FIFO price levels
//! - **Engine**: Validation, matching, and a lock-guarded shared handle
//! - **Config**: Engine settings from defaults or the environment
//!
//! ## Design Principles
//!
//! 1. **Determinism**: The same request sequence always yields the same book
//! 2. **No Floating Point**: Prices and quantities are u64 scaled by 10^8
//! 3. **Reject, don't guess**: Invalid requests fail before any mutation
//! 4. **Synchronous Execution**: Each order runs to completion
//!
//! ## Example
//!
//! ```
//! use limit_book::{MatchingEngine, OrderRequest};
//!
//! let mut engine = MatchingEngine::new();
//! engine.process_order(OrderRequest::parse("sell", "100", "5").unwrap()).unwrap();
//! engine.process_order(OrderRequest::parse("sell", "99", "5").unwrap()).unwrap();
//!
//! // Fills 5 at 99 first, then 1 at 100
//! let result = engine.process_order(OrderRequest::parse("buy", "100", "6").unwrap()).unwrap();
//! assert_eq!(result.trades.len(), 2);
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.asks.len(), 1);
//! assert_eq!(snapshot.asks[0].total_quantity, 400_000_000);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, OrderRequest, Trade
pub mod types;

/// Order book: ledgers, price levels, snapshots
pub mod orderbook;

/// Matching engine and shared handle
pub mod engine;

/// Engine configuration
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{ConfigError, EngineConfig};
pub use engine::{MatchResult, MatchingEngine, SharedEngine};
pub use orderbook::{BookSnapshot, LevelSnapshot, OrderBook, PriceLevel, RestingOrder};
pub use types::{InvalidOrder, Order, OrderRequest, OrderType, Side, Trade};
