//! Line amount calculation.
//!
//! A row contributes `quantity × rate` when both cells hold a non-negative
//! number. Anything else (blank cells, text, negative numbers, or a product
//! too large to represent) makes the row invalid, and an invalid row is
//! worth exactly zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::parse_non_negative;
use crate::LineItem;

/// Result of evaluating one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineAmount {
    /// Both operands were valid; holds the unrounded product.
    Valid(Decimal),

    /// At least one operand was missing, unparseable or negative.
    Invalid,
}

impl LineAmount {
    /// Evaluates a row's quantity and rate.
    pub fn of(item: &LineItem) -> Self {
        Self::from_raw(&item.quantity, &item.rate)
    }

    /// Evaluates raw quantity and rate strings.
    pub fn from_raw(
        quantity: &str,
        rate: &str,
    ) -> Self {
        let (Some(quantity), Some(rate)) = (parse_non_negative(quantity), parse_non_negative(rate))
        else {
            return Self::Invalid;
        };

        match quantity.checked_mul(rate) {
            Some(amount) => Self::Valid(amount),
            None => {
                tracing::warn!(%quantity, %rate, "line amount overflowed, treating row as invalid");
                Self::Invalid
            }
        }
    }

    /// The amount this row contributes; zero when invalid.
    pub fn value(&self) -> Decimal {
        match self {
            Self::Valid(amount) => *amount,
            Self::Invalid => Decimal::ZERO,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Shorthand for `LineAmount::from_raw(quantity, rate).value()`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::line_amount;
///
/// assert_eq!(line_amount("2", "15.5"), dec!(31.0));
/// assert_eq!(line_amount("abc", "10"), dec!(0));
/// ```
pub fn line_amount(
    quantity: &str,
    rate: &str,
) -> Decimal {
    LineAmount::from_raw(quantity, rate).value()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::LineItemId;

    #[test]
    fn multiplies_valid_operands() {
        assert_eq!(LineAmount::from_raw("2", "15.5"), LineAmount::Valid(dec!(31.0)));
    }

    #[test]
    fn keeps_full_precision_until_display() {
        assert_eq!(line_amount("3", "0.333"), dec!(0.999));
    }

    #[test]
    fn non_numeric_quantity_is_invalid() {
        assert_eq!(LineAmount::from_raw("abc", "10"), LineAmount::Invalid);
        assert_eq!(line_amount("abc", "10"), Decimal::ZERO);
    }

    #[test]
    fn non_numeric_rate_is_invalid() {
        assert_eq!(LineAmount::from_raw("1", "ten"), LineAmount::Invalid);
    }

    #[test]
    fn missing_operand_is_invalid() {
        assert_eq!(LineAmount::from_raw("1", ""), LineAmount::Invalid);
        assert_eq!(LineAmount::from_raw("", "5"), LineAmount::Invalid);
    }

    #[test]
    fn negative_operands_are_invalid() {
        assert_eq!(LineAmount::from_raw("-1", "10"), LineAmount::Invalid);
        assert_eq!(LineAmount::from_raw("1", "-10"), LineAmount::Invalid);
        assert_eq!(LineAmount::from_raw("-1", "-10"), LineAmount::Invalid);
    }

    #[test]
    fn zero_operands_are_valid() {
        assert_eq!(LineAmount::from_raw("0", "10"), LineAmount::Valid(dec!(0)));
    }

    #[test]
    fn overflow_is_invalid() {
        let huge = Decimal::MAX.to_string();

        assert_eq!(LineAmount::from_raw(&huge, "2"), LineAmount::Invalid);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let item = LineItem::with_values(LineItemId(1), "Consulting", "4", "12.25");

        assert_eq!(LineAmount::of(&item), LineAmount::of(&item));
        assert_eq!(LineAmount::of(&item).value(), dec!(49.00));
    }
}
