//! Price level: the FIFO queue of resting orders at one price.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - A fully filled order is unlinked and dropped from the slab immediately,
//!   so the queue never holds a zero-quantity entry between calls

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::Order;

/// One fill produced while walking a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub maker_order_id: u64,
    /// Level price; this is the execution price
    pub price: u64,
    pub quantity: u64,
    /// The maker was fully filled and removed from the book
    pub maker_done: bool,
}

/// A price level containing orders at a single price.
///
/// The order data lives in the slab; this struct only holds the queue
/// metadata and the cached total.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Sum of `remaining` over every order in the queue. Wider than a
    /// single order so any number of accepted orders fits.
    pub total_quantity: u128,

    /// Oldest order (slab key), matched first
    pub head: Option<usize>,

    /// Newest order (slab key)
    pub tail: Option<usize>,

    pub order_count: usize,
}

impl PriceLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order to the tail of the queue
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("Invalid slab key");
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = slab.get_mut(tail_key).expect("Invalid tail key");
            tail_node.next = Some(key);
        } else {
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += u128::from(quantity);
    }

    /// Unlink an order from the queue. The node stays in the slab.
    ///
    /// # Returns
    ///
    /// The remaining quantity of the unlinked order
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get(key).expect("Invalid slab key");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            slab.get_mut(prev).expect("Invalid prev key").next = next_key;
        } else {
            self.head = next_key;
        }

        if let Some(next) = next_key {
            slab.get_mut(next).expect("Invalid next key").prev = prev_key;
        } else {
            self.tail = prev_key;
        }

        let node = slab.get_mut(key).expect("Invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity = self.total_quantity.saturating_sub(u128::from(quantity));

        quantity
    }

    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Update the cached total after a partial fill
    pub fn reduce_quantity(&mut self, filled_quantity: u64) {
        self.total_quantity = self.total_quantity.saturating_sub(u128::from(filled_quantity));
    }

    /// Fill `taker` against this level, oldest order first.
    ///
    /// Each resting order is filled completely before the next one is
    /// touched. Makers that reach zero are unlinked and removed from the
    /// slab before this returns. Stops when the taker is filled or the
    /// level is exhausted.
    pub fn match_against(&mut self, taker: &mut Order, slab: &mut Slab<OrderNode>) -> Vec<Fill> {
        let mut fills = Vec::new();

        while !taker.is_filled() {
            let Some(key) = self.head else { break };

            let node = slab.get_mut(key).expect("Invalid head key");
            let quantity = node.order.fill(taker.remaining);
            taker.fill(quantity);
            let maker_order_id = node.order.id;
            let maker_done = node.is_filled();

            self.reduce_quantity(quantity);
            fills.push(Fill {
                maker_order_id,
                price: self.price,
                quantity,
                maker_done,
            });

            if maker_done {
                self.remove(key, slab);
                slab.remove(key);
            }
        }

        fills
    }

    /// Iterate the queued orders from oldest to newest.
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            cursor: self.head,
        }
    }

    /// Whether the cached total equals the sum of the queued orders and no
    /// queued order is empty.
    pub fn is_consistent(&self, slab: &Slab<OrderNode>) -> bool {
        let mut sum = 0u128;
        let mut count = 0usize;
        for order in self.iter(slab) {
            if order.remaining == 0 {
                return false;
            }
            let Some(next) = sum.checked_add(u128::from(order.remaining)) else {
                return false;
            };
            sum = next;
            count += 1;
        }
        sum == self.total_quantity && count == self.order_count
    }
}

/// Oldest-first walk over a level's queue.
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
