//! Order book state for a single instrument.
//!
//! ## Components
//!
//! - [`OrderNode`]: Slab entry wrapping a resting `Order` with queue links
//! - [`PriceLevel`]: FIFO queue of orders at one price, with a cached total
//! - [`OrderBook`]: Bid and ask ledgers plus the id counters
//! - [`BookSnapshot`]: Owned, best-first copy of both ledgers
//!
//! ## Invariants (hold whenever no call is in progress)
//!
//! - A price key is present only while its level is non-empty
//! - Each level's `total_quantity` equals the sum of its orders' `remaining`
//! - No resting order has `remaining == 0`
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log L) |
//! | Best bid/ask | O(log L) |
//! | Fill one maker | O(1) |
//! | Drop emptied level | O(log L) |
//!
//! L = number of price levels on the side.

pub mod book;
pub mod level;
pub mod node;
pub mod snapshot;

pub use book::OrderBook;
pub use level::{Fill, LevelIter, PriceLevel};
pub use node::OrderNode;
pub use snapshot::{BookSnapshot, LevelSnapshot, RestingOrder};
