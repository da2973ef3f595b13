//! Fixed-point price and quantity utilities.
//!
//! ## Overview
//!
//! The book stores prices and quantities as u64 scaled by 10^8. Callers hand
//! in `rust_decimal::Decimal` values (or strings / floats converted through
//! `Decimal`), which are scaled and rounded to 8 decimal places here.
//!
//! ## Examples
//!
//! ```
//! use limit_book::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("100.25").unwrap();
//! assert_eq!(price, 10_025_000_000);
//! assert_eq!(from_fixed(price), "100.25000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
pub const SCALE: u64 = 100_000_000;

/// Number of decimal places kept by the fixed-point representation
pub const DECIMALS: u32 = 8;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if parsing fails, the value is negative, or it does not fit.
///
/// ```
/// use limit_book::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
///
/// Digits beyond the 8th decimal place are rounded away.
/// Returns `None` if the value is negative or out of range.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_zero() {
        return Some(0);
    }
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert an `f64` to a Decimal, or `None` for NaN and infinities.
pub fn f64_to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from_i128_with_scale(value as i128, DECIMALS)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// ```
/// use limit_book::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Convert fixed-point u64 to a human-readable string (trimmed trailing zeros)
///
/// ```
/// use limit_book::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    fixed_to_decimal(value).normalize().to_string()
}

/// Multiply two fixed-point values, keeping the 10^8 scale.
///
/// Returns `None` on overflow.
///
/// ```
/// use limit_book::types::price::checked_mul;
///
/// // 100.0 * 0.5 = 50.0
/// assert_eq!(checked_mul(10_000_000_000, 50_000_000), Some(5_000_000_000));
/// ```
pub fn checked_mul(a: u64, b: u64) -> Option<u64> {
    let product = (a as u128).checked_mul(b as u128)? / SCALE as u128;
    u64::try_from(product).ok()
}

// ============================================================================
// Unit Tests
// ============================================================================
