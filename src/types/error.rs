//! Rejection reasons for incoming order requests.

use thiserror::Error;

/// Why an order request was refused.
///
/// Every variant is raised before the book is touched: a rejected request
/// consumes no order id and leaves both sides unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOrder {
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,

    #[error("price must be greater than zero")]
    NonPositivePrice,

    #[error("price is not a finite number")]
    NonFinitePrice,

    #[error("quantity is not a finite number")]
    NonFiniteQuantity,

    #[error("unrecognized side: {0:?}")]
    UnknownSide(String),

    /// The value parsed but cannot be held as a fixed-point u64
    /// (too many integer digits, or not a number at all).
    #[error("{field} is out of the representable range: {value}")]
    OutOfRange { field: &'static str, value: String },
}
