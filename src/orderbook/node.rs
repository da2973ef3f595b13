//! Slab entry for a resting order.
//!
//! Orders at one price form a doubly-linked list threaded through the slab:
//! `prev` points towards the head (older), `next` towards the tail (newer).
//! Links are slab keys, not references, so a node can be unlinked in O(1).

use crate::types::Order;

/// A resting order plus its queue links.
#[derive(Debug, Clone)]
pub struct OrderNode {
    pub order: Order,

    /// Next (newer) order at the same price; `None` at the tail
    pub next: Option<usize>,

    /// Previous (older) order at the same price; `None` at the head
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Wrap an order; the node starts unlinked.
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}
