use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals derived from the current line items and the tax-rate field.
///
/// Never stored on its own; every value is recomputed from raw input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all valid line amounts.
    pub subtotal: Decimal,

    /// Effective tax rate in percent (0 when the field was invalid).
    pub tax_rate: Decimal,

    /// `subtotal * tax_rate / 100`.
    pub tax_amount: Decimal,

    /// `subtotal + tax_amount`.
    pub total: Decimal,
}
