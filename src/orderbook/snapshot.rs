//! Read-only, owned views of book state for display consumers.
//!
//! A [`BookSnapshot`] is a copy: once returned it is unaffected by later
//! matching. Bids are ordered highest price first, asks lowest price first,
//! and orders within a level oldest first.

use serde::Serialize;
use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{Order, Side};

/// A resting order as seen by a snapshot consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestingOrder {
    pub id: u64,
    pub side: Side,
    pub price: u64,
    /// Open (unfilled) quantity
    pub quantity: u64,
    pub timestamp: u64,
}

impl From<&Order> for RestingOrder {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            side: order.side(),
            price: order.price,
            quantity: order.remaining,
            timestamp: order.timestamp,
        }
    }
}

/// One price level in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSnapshot {
    pub price: u64,
    pub total_quantity: u128,
    pub orders: Vec<RestingOrder>,
}

impl LevelSnapshot {
    pub(crate) fn capture(level: &PriceLevel, slab: &Slab<OrderNode>) -> Self {
        Self {
            price: level.price,
            total_quantity: level.total_quantity,
            orders: level.iter(slab).map(RestingOrder::from).collect(),
        }
    }
}

/// Both sides of the book, best price first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookSnapshot {
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.first().map(|l| l.price)
    }

    pub fn best_ask(&self) -> Option<u64> {
        self.asks.first().map(|l| l.price)
    }

    /// Best bid at or above best ask. Never true for a snapshot taken from
    /// a book between calls.
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    /// Keep only the best `levels` price levels on each side.
    pub fn depth(mut self, levels: usize) -> Self {
        self.bids.truncate(levels);
        self.asks.truncate(levels);
        self
    }

    /// Total open quantity on one side.
    pub fn side_quantity(&self, side: Side) -> u128 {
        let levels = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        levels.iter().map(|l| l.total_quantity).sum()
    }
}
