//! Single-instrument order book: two price-level ledgers over one slab.
//!
//! ## Architecture
//!
//! - **Slab**: Pre-allocated storage for resting orders
//! - **BTreeMap** per side: price levels kept sorted as they are inserted
//!   and removed, so best-first iteration needs no per-call sort
//!
//! ## Price Ordering
//!
//! - **Bids**: keyed by `Reverse(price)`, iterate high-to-low
//! - **Asks**: keyed by `price`, iterate low-to-high
//!
//! A price key exists only while its level holds at least one order.
//!
//! ## Example
//!
//! Orders reach the book only through [`MatchingEngine`](crate::MatchingEngine),
//! which validates them first:
//!
//! ```
//! use limit_book::{MatchingEngine, OrderRequest};
//! use rust_decimal::Decimal;
//!
//! let mut engine = MatchingEngine::new();
//! engine.process_order(OrderRequest::buy(Decimal::from(100), Decimal::ONE)).unwrap();
//! engine.process_order(OrderRequest::sell(Decimal::from(101), Decimal::ONE)).unwrap();
//!
//! let book = engine.book();
//! assert_eq!(book.best_bid(), Some(10_000_000_000));
//! assert_eq!(book.best_ask(), Some(10_100_000_000));
//! assert_eq!(book.spread(), Some(100_000_000));
//! ```
//!
//! Resting an order directly is not part of the public API:
//!
//! ```compile_fail
//! use limit_book::orderbook::OrderBook;
//! use limit_book::types::{Order, Side};
//!
//! let mut book = OrderBook::new();
//! book.rest_order(Order::new(1, Side::Buy, 10_000_000_000, 0, 0));
//! ```

use std::cmp::Reverse;
use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::orderbook::{BookSnapshot, Fill, LevelSnapshot, OrderNode, PriceLevel};
use crate::types::{Order, Side};

/// Limit order book for one instrument.
///
/// Owns both ledgers and the order/trade id counters. Ids are never shared
/// across books and never reused within one.
#[derive(Debug)]
pub struct OrderBook {
    /// Resting order storage; links form the per-level FIFO queues
    orders: Slab<OrderNode>,

    /// Bid price levels (sorted high to low)
    bids: BTreeMap<Reverse<u64>, PriceLevel>,

    /// Ask price levels (sorted low to high)
    asks: BTreeMap<u64, PriceLevel>,

    next_order_id: u64,
    next_trade_id: u64,

    bid_count: usize,
    ask_count: usize,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with `order_capacity` resting-order slots pre-allocated.
    ///
    /// ```
    /// use limit_book::orderbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            next_order_id: 1,
            next_trade_id: 1,
            bid_count: 0,
            ask_count: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders on both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    // ========================================================================
    // ID Generation
    // ========================================================================

    /// Take the next order id
    #[inline]
    pub fn next_order_id(&mut self) -> u64 {
        let id = self.next_order_id;
        self.next_order_id += 1;
        id
    }

    /// The id the next accepted order will receive
    #[inline]
    pub fn peek_next_order_id(&self) -> u64 {
        self.next_order_id
    }

    /// Take the next trade id
    #[inline]
    pub fn next_trade_id(&mut self) -> u64 {
        let id = self.next_trade_id;
        self.next_trade_id += 1;
        id
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    /// Highest bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Lowest ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    /// Best price on `side`
    pub fn best_price(&self, side: Side) -> Option<u64> {
        match side {
            Side::Buy => self.best_bid(),
            Side::Sell => self.best_ask(),
        }
    }

    /// best_ask - best_bid, or None if either side is empty
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    pub fn best_bid_level(&self) -> Option<&PriceLevel> {
        self.bids.values().next()
    }

    pub fn best_ask_level(&self) -> Option<&PriceLevel> {
        self.asks.values().next()
    }

    /// The level at exactly `price` on `side`, if any orders rest there
    pub fn level(&self, side: Side, price: u64) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bids.get(&Reverse(price)),
            Side::Sell => self.asks.get(&price),
        }
    }

    /// Orders resting at `price` on `side`, oldest first
    pub fn orders_at(&self, side: Side, price: u64) -> Vec<&Order> {
        self.level(side, price)
            .map(|level| level.iter(&self.orders).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append an order to the tail of its own side's queue at its price,
    /// creating the level if needed.
    ///
    /// # Returns
    ///
    /// The slab key for the resting order
    pub(crate) fn rest_order(&mut self, order: Order) -> usize {
        let price = order.price;
        let side = order.side();
        let key = self.orders.insert(OrderNode::new(order));

        match side {
            Side::Buy => {
                self.bids
                    .entry(Reverse(price))
                    .or_insert_with(|| PriceLevel::new(price))
                    .push_back(key, &mut self.orders);
                self.bid_count += 1;
            }
            Side::Sell => {
                self.asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price))
                    .push_back(key, &mut self.orders);
                self.ask_count += 1;
            }
        }

        key
    }

    /// Fill `taker` against the level at `price` on `side`.
    ///
    /// Filled makers are purged and the level is dropped once empty, all
    /// before this returns. The caller decides whether the level is
    /// eligible for the taker's limit.
    pub(crate) fn fill_level(&mut self, side: Side, price: u64, taker: &mut Order) -> Vec<Fill> {
        let Self {
            orders,
            bids,
            asks,
            bid_count,
            ask_count,
            ..
        } = self;

        let (level, count) = match side {
            Side::Buy => (bids.get_mut(&Reverse(price)), bid_count),
            Side::Sell => (asks.get_mut(&price), ask_count),
        };
        let Some(level) = level else {
            return Vec::new();
        };

        let fills = level.match_against(taker, orders);
        *count -= fills.iter().filter(|f| f.maker_done).count();
        debug_assert!(level.is_consistent(orders), "level {} total drifted", price);

        if level.is_empty() {
            match side {
                Side::Buy => bids.remove(&Reverse(price)),
                Side::Sell => asks.remove(&price),
            };
        }

        fills
    }

    /// Clear all orders from the book. Id counters keep running.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
        self.bid_count = 0;
        self.ask_count = 0;
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Copy out both sides, best price first.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self
                .bids
                .values()
                .map(|level| LevelSnapshot::capture(level, &self.orders))
                .collect(),
            asks: self
                .asks
                .values()
                .map(|level| LevelSnapshot::capture(level, &self.orders))
                .collect(),
        }
    }

    /// SHA-256 over the SSZ encoding of every resting order: bids best-first,
    /// then asks best-first, FIFO within each level.
    ///
    /// Identical request sequences with identical timestamps give identical
    /// roots.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        let levels = self.bids.values().chain(self.asks.values());
        for level in levels {
            for order in level.iter(&self.orders) {
                let bytes = ssz_rs::serialize(order).expect("fixed-size order encoding");
                hasher.update(&bytes);
            }
        }
        hasher.finalize().into()
    }

    /// Hex form of [`OrderBook::state_root`]
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }

    /// Every level's cached total matches its orders, no empty level or
    /// zero-quantity order is present, and per-side counts agree.
    pub fn is_consistent(&self) -> bool {
        let bids_ok = self
            .bids
            .iter()
            .all(|(key, level)| key.0 == level.price && !level.is_empty() && level.is_consistent(&self.orders));
        let asks_ok = self
            .asks
            .iter()
            .all(|(key, level)| *key == level.price && !level.is_empty() && level.is_consistent(&self.orders));
        let bid_orders: usize = self.bids.values().map(|l| l.order_count).sum();
        let ask_orders: usize = self.asks.values().map(|l| l.order_count).sum();

        bids_ok
            && asks_ok
            && bid_orders == self.bid_count
            && ask_orders == self.ask_count
            && self.bid_count + self.ask_count == self.orders.len()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
