//! Caller-supplied order requests and their validation.
//!
//! An [`OrderRequest`] is what a host submits: side, limit price and quantity
//! as decimals. The engine validates it into fixed-point values before
//! stamping an id, so a rejected request never touches the book.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::price::{decimal_to_fixed, f64_to_decimal};
use crate::types::{InvalidOrder, Side};

/// A limit order as submitted by a caller, before the engine assigns an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Price and quantity of a request after validation, in fixed-point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub side: Side,
    pub price: u64,
    pub quantity: u64,
}

impl OrderRequest {
    pub fn new(side: Side, price: Decimal, quantity: Decimal) -> Self {
        Self { side, price, quantity }
    }

    pub fn buy(price: Decimal, quantity: Decimal) -> Self {
        Self::new(Side::Buy, price, quantity)
    }

    pub fn sell(price: Decimal, quantity: Decimal) -> Self {
        Self::new(Side::Sell, price, quantity)
    }

    /// Build a request from floating-point inputs.
    ///
    /// NaN and infinities are rejected here since `Decimal` cannot hold them.
    /// Finite values beyond `Decimal`'s range are `OutOfRange`.
    ///
    /// ```
    /// use limit_book::types::{InvalidOrder, OrderRequest, Side};
    ///
    /// assert!(OrderRequest::from_f64(Side::Buy, 100.5, 2.0).is_ok());
    /// assert_eq!(
    ///     OrderRequest::from_f64(Side::Buy, f64::NAN, 2.0),
    ///     Err(InvalidOrder::NonFinitePrice),
    /// );
    /// ```
    pub fn from_f64(side: Side, price: f64, quantity: f64) -> Result<Self, InvalidOrder> {
        let price = float_to_decimal("price", price, InvalidOrder::NonFinitePrice)?;
        let quantity = float_to_decimal("quantity", quantity, InvalidOrder::NonFiniteQuantity)?;
        Ok(Self::new(side, price, quantity))
    }

    /// Build a request from text fields, e.g. a form or a command line.
    ///
    /// ```
    /// use limit_book::types::{InvalidOrder, OrderRequest};
    ///
    /// let req = OrderRequest::parse("sell", "101.25", "3").unwrap();
    /// assert_eq!(req.price.to_string(), "101.25");
    ///
    /// assert!(matches!(
    ///     OrderRequest::parse("short", "1", "1"),
    ///     Err(InvalidOrder::UnknownSide(_)),
    /// ));
    /// ```
    pub fn parse(side: &str, price: &str, quantity: &str) -> Result<Self, InvalidOrder> {
        let side = side.parse::<Side>()?;
        let price = parse_decimal("price", price)?;
        let quantity = parse_decimal("quantity", quantity)?;
        Ok(Self::new(side, price, quantity))
    }

    /// Check the request and convert it to fixed-point.
    ///
    /// Price is checked before quantity. A value that rounds to zero at
    /// 8 decimal places counts as non-positive.
    pub fn validate(&self) -> Result<ValidatedOrder, InvalidOrder> {
        let price = to_positive_fixed("price", self.price, InvalidOrder::NonPositivePrice)?;
        let quantity =
            to_positive_fixed("quantity", self.quantity, InvalidOrder::NonPositiveQuantity)?;

        Ok(ValidatedOrder {
            side: self.side,
            price,
            quantity,
        })
    }
}

fn float_to_decimal(
    field: &'static str,
    value: f64,
    non_finite: InvalidOrder,
) -> Result<Decimal, InvalidOrder> {
    if !value.is_finite() {
        return Err(non_finite);
    }
    f64_to_decimal(value).ok_or_else(|| InvalidOrder::OutOfRange {
        field,
        value: value.to_string(),
    })
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, InvalidOrder> {
    let trimmed = raw.trim();
    trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| InvalidOrder::OutOfRange {
            field,
            value: raw.to_string(),
        })
}

fn to_positive_fixed(
    field: &'static str,
    value: Decimal,
    non_positive: InvalidOrder,
) -> Result<u64, InvalidOrder> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(non_positive);
    }
    match decimal_to_fixed(value) {
        Some(0) => Err(non_positive),
        Some(fixed) => Ok(fixed),
        None => Err(InvalidOrder::OutOfRange {
            field,
            value: value.to_string(),
        }),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
