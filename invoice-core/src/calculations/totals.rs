//! Invoice totals.
//!
//! | Line      | Description |
//! |-----------|-------------|
//! | subtotal  | Σ quantity × rate over valid rows |
//! | tax rate  | percentage field, 0 when unparseable or outside 0–100 |
//! | tax       | subtotal × tax rate / 100 |
//! | total     | subtotal + tax |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use invoice_core::calculations::TotalsCalculator;
//! use invoice_core::{LineItem, LineItemId};
//!
//! let items = vec![
//!     LineItem::with_values(LineItemId(1), "Design", "1", "100"),
//!     LineItem::with_values(LineItemId(2), "Hosting", "2", "50"),
//! ];
//!
//! let totals = TotalsCalculator::new(&items).calculate("10");
//!
//! assert_eq!(totals.subtotal, dec!(200));
//! assert_eq!(totals.tax_amount, dec!(20));
//! assert_eq!(totals.total, dec!(220));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::common::parse_number;
use super::line_item::LineAmount;
use crate::{InvoiceTotals, LineItem};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Parses the tax-rate percentage field.
///
/// Unparseable input and values outside `0..=100` both yield zero.
pub fn parse_tax_rate(s: &str) -> Decimal {
    match parse_number(s) {
        Some(rate) if rate >= Decimal::ZERO && rate <= ONE_HUNDRED => rate,
        Some(rate) => {
            debug!(%rate, "tax rate outside 0-100, using 0");
            Decimal::ZERO
        }
        None => Decimal::ZERO,
    }
}

/// Calculator over the current set of rows.
///
/// Holds a borrowed view of the rows and recomputes everything on each call;
/// nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct TotalsCalculator<'a> {
    items: &'a [LineItem],
}

impl<'a> TotalsCalculator<'a> {
    pub fn new(items: &'a [LineItem]) -> Self {
        Self { items }
    }

    /// Computes all totals for the raw tax-rate field value.
    pub fn calculate(
        &self,
        tax_rate: &str,
    ) -> InvoiceTotals {
        let subtotal = self.subtotal();
        let tax_rate = parse_tax_rate(tax_rate);
        let tax_amount = self.tax_amount(subtotal, tax_rate);
        let total = subtotal.checked_add(tax_amount).unwrap_or(subtotal);

        debug!(%subtotal, %tax_rate, %tax_amount, %total, rows = self.items.len(), "totals recalculated");

        InvoiceTotals {
            subtotal,
            tax_rate,
            tax_amount,
            total,
        }
    }

    /// Sum over valid rows. Invalid rows contribute zero.
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(LineAmount::of)
            .filter_map(|amount| match amount {
                LineAmount::Valid(value) => Some(value),
                LineAmount::Invalid => None,
            })
            .fold(Decimal::ZERO, |sum, value| match sum.checked_add(value) {
                Some(next) => next,
                None => {
                    warn!(%value, "subtotal overflowed, skipping row");
                    sum
                }
            })
    }

    /// `subtotal × rate / 100`, unrounded.
    pub fn tax_amount(
        &self,
        subtotal: Decimal,
        tax_rate: Decimal,
    ) -> Decimal {
        subtotal
            .checked_mul(tax_rate)
            .and_then(|product| product.checked_div(ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// Number of rows that contribute to the subtotal.
    pub fn valid_rows(&self) -> usize {
        self.items
            .iter()
            .filter(|item| LineAmount::of(item).is_valid())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::LineItemId;

    fn item(
        id: u64,
        quantity: &str,
        rate: &str,
    ) -> LineItem {
        LineItem::with_values(LineItemId(id), format!("row {id}"), quantity, rate)
    }

    // =========================================================================
    // parse_tax_rate tests
    // =========================================================================

    #[test]
    fn parse_tax_rate_accepts_percentages() {
        assert_eq!(parse_tax_rate("10"), dec!(10));
        assert_eq!(parse_tax_rate("7.5"), dec!(7.5));
        assert_eq!(parse_tax_rate("0"), dec!(0));
        assert_eq!(parse_tax_rate("100"), dec!(100));
    }

    #[test]
    fn parse_tax_rate_defaults_to_zero_on_garbage() {
        assert_eq!(parse_tax_rate(""), Decimal::ZERO);
        assert_eq!(parse_tax_rate("ten"), Decimal::ZERO);
    }

    #[test]
    fn parse_tax_rate_defaults_to_zero_out_of_range() {
        assert_eq!(parse_tax_rate("-5"), Decimal::ZERO);
        assert_eq!(parse_tax_rate("100.01"), Decimal::ZERO);
    }

    // =========================================================================
    // subtotal tests
    // =========================================================================

    #[test]
    fn subtotal_of_no_rows_is_zero() {
        let items: Vec<LineItem> = vec![];

        assert_eq!(TotalsCalculator::new(&items).subtotal(), Decimal::ZERO);
    }

    #[test]
    fn subtotal_skips_invalid_rows() {
        let items = vec![item(1, "1", "100"), item(2, "abc", "10"), item(3, "2", "50")];
        let calculator = TotalsCalculator::new(&items);

        assert_eq!(calculator.subtotal(), dec!(200));
        assert_eq!(calculator.valid_rows(), 2);
    }

    #[test]
    fn subtotal_skips_negative_rows() {
        let items = vec![item(1, "1", "100"), item(2, "-2", "50")];

        assert_eq!(TotalsCalculator::new(&items).subtotal(), dec!(100));
    }

    #[test]
    fn subtotal_with_only_invalid_rows_is_zero() {
        let items = vec![item(1, "", ""), item(2, "x", "y")];

        assert_eq!(TotalsCalculator::new(&items).subtotal(), Decimal::ZERO);
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_applies_tax() {
        let items = vec![item(1, "1", "100"), item(2, "2", "50")];

        let totals = TotalsCalculator::new(&items).calculate("10");

        assert_eq!(
            totals,
            InvoiceTotals {
                subtotal: dec!(200),
                tax_rate: dec!(10),
                tax_amount: dec!(20),
                total: dec!(220),
            }
        );
    }

    #[test]
    fn calculate_with_invalid_tax_rate_has_no_tax() {
        let items = vec![item(1, "3", "33.33")];

        let totals = TotalsCalculator::new(&items).calculate("abc");

        assert_eq!(totals.subtotal, dec!(99.99));
        assert_eq!(totals.tax_rate, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, dec!(99.99));
    }

    #[test]
    fn calculate_keeps_unrounded_tax() {
        let items = vec![item(1, "1", "10.10")];

        let totals = TotalsCalculator::new(&items).calculate("7.5");

        // 10.10 * 7.5 / 100 = 0.7575, rounded only for display
        assert_eq!(totals.tax_amount, dec!(0.7575));
        assert_eq!(totals.total, dec!(10.8575));
    }

    #[test]
    fn calculate_is_repeatable() {
        let items = vec![item(1, "2", "15.5")];
        let calculator = TotalsCalculator::new(&items);

        assert_eq!(calculator.calculate("5"), calculator.calculate("5"));
    }
}
