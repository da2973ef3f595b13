//! Thread-safe handle around a [`MatchingEngine`].
//!
//! The engine itself is unsynchronized. This handle serializes submissions
//! behind a write lock; snapshots take a read lock and return an owned copy.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::engine::{MatchResult, MatchingEngine};
use crate::orderbook::BookSnapshot;
use crate::types::{InvalidOrder, OrderRequest};

#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<RwLock<MatchingEngine>>,
}

impl SharedEngine {
    pub fn new(engine: MatchingEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Process one order under the write lock.
    pub fn submit(&self, request: OrderRequest) -> Result<MatchResult, InvalidOrder> {
        self.inner.write().process_order(request)
    }

    pub fn submit_at(&self, request: OrderRequest, timestamp: u64) -> Result<MatchResult, InvalidOrder> {
        self.inner.write().process_order_at(request, timestamp)
    }

    pub fn snapshot(&self) -> BookSnapshot {
        self.inner.read().snapshot()
    }

    /// Run a read-only query against the engine under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&MatchingEngine) -> R) -> R {
        f(&self.inner.read())
    }
}
