//! Order types for the limit order book.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so resting orders have a
//! deterministic byte encoding (used by the book's state root).
//! - Basic types (u64, u8): Direct little-endian encoding
//! - Fixed-size composites: Concatenated little-endian fields
//!
//! ## Fixed-Point Representation
//!
//! Prices and quantities are stored as u64 scaled by 10^8 (see [`crate::types::price::SCALE`]).

use std::fmt;
use std::str::FromStr;

use ssz_rs::prelude::*;

use crate::types::InvalidOrder;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether a resting order at `resting_price` is within an incoming
    /// order's `limit` on this side.
    ///
    /// A buy accepts anything at or below its limit, a sell anything at or above.
    #[inline]
    pub fn accepts(self, limit: u64, resting_price: u64) -> bool {
        match self {
            Side::Buy => resting_price <= limit,
            Side::Sell => resting_price >= limit,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for Side {
    type Err = InvalidOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "bid" => Ok(Side::Buy),
            "sell" | "ask" => Ok(Side::Sell),
            _ => Err(InvalidOrder::UnknownSide(s.to_string())),
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// Order type enumeration
///
/// Only limit orders are matched. The discriminant is carried on every order
/// so market semantics can be added without changing the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    /// Limit order - executes at specified price or better
    #[default]
    Limit,
}

impl OrderType {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderType::Limit => 0,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderType::Limit),
            _ => None,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order, either incoming or resting in the book.
///
/// `remaining` is the only field that changes after the engine stamps the
/// order. An order whose `remaining` reaches zero is removed from the book in
/// the same call that filled it.
///
/// ## SSZ Layout
///
/// Fixed-size container: 8+1+8+8+8+8+1 = 42 bytes.
///
/// ## Example
///
/// ```
/// use limit_book::types::{Order, Side};
///
/// // Buy 1.0 at 100.0
/// let order = Order::new(
///     1,                      // id
///     Side::Buy,              // side
///     10_000_000_000,         // price: 100.00000000
///     100_000_000,            // quantity: 1.00000000
///     1703577600000,          // timestamp (ms)
/// );
/// assert_eq!(order.remaining, order.quantity);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Sequence id assigned by the book at submission
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Limit price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Quantity at submission in fixed-point (scaled by 10^8)
    pub quantity: u64,

    /// Quantity still open; decremented on every fill
    pub remaining: u64,

    /// Arrival timestamp in milliseconds. Informational only.
    pub timestamp: u64,

    /// Order type as u8 (0=Limit)
    pub order_type_raw: u8,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Example
    ///
    /// ```
    /// use limit_book::types::{Order, Side};
    ///
    /// let order = Order::new(1, Side::Sell, 10_000_000_000, 100_000_000, 0);
    /// assert_eq!(order.side(), Side::Sell);
    /// ```
    pub fn new(id: u64, side: Side, price: u64, quantity: u64, timestamp: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            remaining: quantity,
            timestamp,
            order_type_raw: OrderType::Limit.to_u8(),
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Get the order type
    pub fn order_type(&self) -> OrderType {
        OrderType::from_u8(self.order_type_raw).unwrap_or(OrderType::Limit)
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The actual quantity filled (may be less if order doesn't have enough remaining)
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_conversion() {
        assert_eq!(Side::Buy.to_u8(), 0);
        assert_eq!(Side::Sell.to_u8(), 1);
        assert_eq!(Side::from_u8(0), Some(Side::Buy));
        assert_eq!(Side::from_u8(1), Some(Side::Sell));
        assert_eq!(Side::from_u8(2), None);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_accepts() {
        // Buy limit 100 takes asks at 99 and 100, not 101
        assert!(Side::Buy.accepts(100, 99));
        assert!(Side::Buy.accepts(100, 100));
        assert!(!Side::Buy.accepts(100, 101));

        // Sell limit 100 takes bids at 101 and 100, not 99
        assert!(Side::Sell.accepts(100, 101));
        assert!(Side::Sell.accepts(100, 100));
        assert!(!Side::Sell.accepts(100, 99));
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" BID ".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("Sell".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("ask".parse::<Side>().unwrap(), Side::Sell);

        let err = "hold".parse::<Side>().unwrap_err();
        assert_eq!(err, InvalidOrder::UnknownSide("hold".to_string()));
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Buy.to_string(), "buy");
        assert_eq!(Side::Sell.to_string(), "sell");
    }

    #[test]
    fn test_order_type_conversion() {
        assert_eq!(OrderType::Limit.to_u8(), 0);
        assert_eq!(OrderType::from_u8(0), Some(OrderType::Limit));
        assert_eq!(OrderType::from_u8(1), None);
    }

    #[test]
    fn test_order_new() {
        let order = Order::new(7, Side::Sell, 10_000_000_000, 500_000_000, 1703577600000);

        assert_eq!(order.id, 7);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.price, 10_000_000_000);
        assert_eq!(order.quantity, 500_000_000);
        assert_eq!(order.remaining, 500_000_000);
        assert_eq!(order.order_type(), OrderType::Limit);
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill() {
        let mut order = Order::new(1, Side::Buy, 10_000_000_000, 100_000_000, 0);

        let filled = order.fill(30_000_000);
        assert_eq!(filled, 30_000_000);
        assert_eq!(order.remaining, 70_000_000);
        assert_eq!(order.filled_quantity(), 30_000_000);
        assert!(!order.is_filled());

        let filled = order.fill(70_000_000);
        assert_eq!(filled, 70_000_000);
        assert!(order.is_filled());
    }

    #[test]
    fn test_order_overfill() {
        let mut order = Order::new(1, Side::Buy, 10_000_000_000, 100_000_000, 0);

        let filled = order.fill(200_000_000);
        assert_eq!(filled, 100_000_000);
        assert_eq!(order.remaining, 0);
        assert!(order.is_filled());
    }

    #[test]
    fn test_order_ssz_size() {
        let order = Order::new(1, Side::Buy, 10_000_000_000, 100_000_000, 0);
        let bytes = ssz_rs::serialize(&order).expect("Failed to serialize");

        // id + side_raw + price + quantity + remaining + timestamp + order_type_raw
        assert_eq!(bytes.len(), 42, "Order should serialize to 42 bytes");
    }

    #[test]
    fn test_order_encoding_tracks_remaining() {
        let mut order = Order::new(1, Side::Buy, 10_000_000_000, 100_000_000, 0);
        let before = ssz_rs::serialize(&order).expect("Failed to serialize");

        order.fill(1);
        let after = ssz_rs::serialize(&order).expect("Failed to serialize");

        assert_ne!(before, after, "Partial fills must change the encoding");
    }
}
