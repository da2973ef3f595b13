//! Core data types for the limit order book
//!
//! ## Types
//!
//! - [`Order`]: A limit order, incoming or resting
//! - [`Side`]: Buy or Sell
//! - [`OrderType`]: Type of order (Limit only)
//! - [`OrderRequest`]: Caller input before validation
//! - [`Trade`]: A fill between a maker and a taker
//! - [`InvalidOrder`]: Why a request was refused
//!
//! ## Fixed-Point Arithmetic
//!
//! All prices and quantities are stored as `u64` scaled by 10^8.
//! Example: 100.25 is stored as 10_025_000_000u64

mod error;
mod order;
mod request;
mod trade;
pub mod price;

pub use error::InvalidOrder;
pub use order::{Order, OrderType, Side};
pub use request::{OrderRequest, ValidatedOrder};
pub use trade::Trade;
