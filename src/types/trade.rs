//! Trade type representing an executed fill between two orders.

use serde::Serialize;

use crate::types::price::checked_mul;
use crate::types::Side;

/// A trade represents a single fill between a maker and a taker order.
///
/// ## Terminology
///
/// - **Maker**: The resting order that was already in the book
/// - **Taker**: The incoming order that triggered the match
///
/// ## Price Discovery
///
/// The trade always executes at the maker's price. The taker's limit only
/// decides which levels are eligible.
///
/// ## Example
///
/// ```
/// use limit_book::types::{Side, Trade};
///
/// let trade = Trade::new(
///     1,                      // trade_id
///     10,                     // maker_order_id
///     11,                     // taker_order_id
///     Side::Buy,              // taker side
///     9_900_000_000,          // price: 99.00000000
///     500_000_000,            // quantity: 5.00000000
///     1703577600000,          // timestamp
/// );
/// assert_eq!(trade.notional(), Some(49_500_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trade {
    /// Trade identifier (assigned by the book)
    pub id: u64,

    /// Maker order ID (the resting order)
    pub maker_order_id: u64,

    /// Taker order ID (the incoming order)
    pub taker_order_id: u64,

    /// Side of the incoming order
    pub taker_side: Side,

    /// Execution price in fixed-point (scaled by 10^8), always the maker's price
    pub price: u64,

    /// Executed quantity in fixed-point (scaled by 10^8)
    pub quantity: u64,

    /// Execution timestamp in milliseconds
    pub timestamp: u64,
}

impl Trade {
    pub fn new(
        id: u64,
        maker_order_id: u64,
        taker_order_id: u64,
        taker_side: Side,
        price: u64,
        quantity: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            maker_order_id,
            taker_order_id,
            taker_side,
            price,
            quantity,
            timestamp,
        }
    }

    /// Notional value (price * quantity) in fixed-point, or `None` on overflow.
    pub fn notional(&self) -> Option<u64> {
        checked_mul(self.price, self.quantity)
    }
}
