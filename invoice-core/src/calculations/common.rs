//! Common utility functions for invoice calculations.
//!
//! This module provides shared functionality used across the line-item and
//! totals calculations, including rounding and input parsing.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Parses raw user input as a decimal number.
///
/// Surrounding whitespace is ignored. Returns `None` for empty input or
/// anything that is not a plain decimal literal: an optional sign, digits and
/// at most one point. Exponents, digit separators and out-of-range values are
/// rejected.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::common::parse_number;
///
/// assert_eq!(parse_number(" 15.5 "), Some(dec!(15.5)));
/// assert_eq!(parse_number("abc"), None);
/// assert_eq!(parse_number(""), None);
/// assert_eq!(parse_number("1e3"), None);
/// ```
pub fn parse_number(s: &str) -> Option<Decimal> {
    static PLAIN_DECIMAL: OnceLock<Regex> = OnceLock::new();
    let plain = PLAIN_DECIMAL
        .get_or_init(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").expect("static pattern"));

    let trimmed = s.trim();
    if !plain.is_match(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Like [`parse_number`], but also rejects negative values.
pub fn parse_non_negative(s: &str) -> Option<Decimal> {
    parse_number(s).filter(|value| !value.is_sign_negative() || value.is_zero())
}
