//! Read-only view of an invoice for renderers.
//!
//! Collects the form fields, the listed rows with their display amounts and
//! the totals. Renderers (on-screen preview, print, export) consume this and
//! nothing else.

use crate::calculations::common::parse_non_negative;
use crate::calculations::{LineAmount, TotalsCalculator, format_currency};
use crate::{CurrencySymbol, FormField, FormSnapshot, InvoiceTotals, LineItem};

/// One row as it appears on the invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLine {
    /// 1-based position among the listed rows.
    pub number: usize,
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    fields: FormSnapshot,
    currency: CurrencySymbol,
    lines: Vec<DocumentLine>,
    totals: InvoiceTotals,
}

impl InvoiceDocument {
    /// Builds the document from the current form state.
    ///
    /// Only rows with a description, quantity and rate are listed. Totals
    /// still cover every valid row.
    pub fn build(
        fields: &FormSnapshot,
        items: &[LineItem],
    ) -> Self {
        let currency = fields.currency();
        let totals = TotalsCalculator::new(items).calculate(fields.get(FormField::TaxRate));
        let lines = items
            .iter()
            .filter(|item| item.is_complete())
            .enumerate()
            .map(|(idx, item)| DocumentLine {
                number: idx + 1,
                description: item.description.clone(),
                quantity: item.quantity.clone(),
                rate: format_currency(parse_non_negative(&item.rate).unwrap_or_default(), currency),
                amount: format_currency(LineAmount::of(item).value(), currency),
            })
            .collect();

        Self {
            fields: fields.clone(),
            currency,
            lines,
            totals,
        }
    }

    pub fn field(
        &self,
        field: FormField,
    ) -> &str {
        self.fields.get(field)
    }

    pub fn currency(&self) -> CurrencySymbol {
        self.currency
    }

    pub fn lines(&self) -> &[DocumentLine] {
        &self.lines
    }

    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }

    pub fn subtotal_text(&self) -> String {
        format_currency(self.totals.subtotal, self.currency)
    }

    pub fn tax_amount_text(&self) -> String {
        format_currency(self.totals.tax_amount, self.currency)
    }

    pub fn total_text(&self) -> String {
        format_currency(self.totals.total, self.currency)
    }

    /// The tax line is only printed when there is tax to show.
    pub fn shows_tax_line(&self) -> bool {
        self.totals.tax_amount > rust_decimal::Decimal::ZERO
    }

    /// Non-blank company contact lines, in print order.
    pub fn company_contact_lines(&self) -> Vec<(FormField, &str)> {
        self.non_blank(&[
            FormField::CompanyAddress,
            FormField::CompanyPhone,
            FormField::CompanyEmail,
            FormField::CompanyEmail2,
            FormField::CompanyWebsite,
        ])
    }

    /// Non-blank client contact lines, in print order.
    pub fn client_contact_lines(&self) -> Vec<(FormField, &str)> {
        self.non_blank(&[
            FormField::ClientAddress,
            FormField::ClientPhone,
            FormField::ClientEmail,
        ])
    }

    fn non_blank(
        &self,
        fields: &[FormField],
    ) -> Vec<(FormField, &str)> {
        fields
            .iter()
            .map(|field| (*field, self.fields.get(*field)))
            .filter(|(_, value)| !value.trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::LineItemId;

    fn snapshot() -> FormSnapshot {
        let mut snapshot = FormSnapshot::new();
        snapshot.set(FormField::CompanyName, "Acme");
        snapshot.set(FormField::CompanyPhone, "+1 555 0100");
        snapshot.set(FormField::ClientName, "Jane");
        snapshot.set(FormField::Currency, "$");
        snapshot.set(FormField::TaxRate, "10");
        snapshot
    }

    #[test]
    fn lists_only_complete_rows_and_numbers_them() {
        let items = vec![
            LineItem::with_values(LineItemId(1), "Design", "1", "100"),
            LineItem::with_values(LineItemId(2), "", "3", "10"),
            LineItem::with_values(LineItemId(3), "Hosting", "2", "50"),
        ];

        let doc = InvoiceDocument::build(&snapshot(), &items);

        assert_eq!(
            doc.lines(),
            &[
                DocumentLine {
                    number: 1,
                    description: "Design".to_string(),
                    quantity: "1".to_string(),
                    rate: "$100.00".to_string(),
                    amount: "$100.00".to_string(),
                },
                DocumentLine {
                    number: 2,
                    description: "Hosting".to_string(),
                    quantity: "2".to_string(),
                    rate: "$50.00".to_string(),
                    amount: "$100.00".to_string(),
                },
            ]
        );
        // The undescribed row still counts toward the totals.
        assert_eq!(doc.totals().subtotal, dec!(230));
    }

    #[test]
    fn formats_totals_with_the_form_currency() {
        let items = vec![
            LineItem::with_values(LineItemId(1), "Design", "1", "100"),
            LineItem::with_values(LineItemId(2), "Hosting", "2", "50"),
        ];

        let doc = InvoiceDocument::build(&snapshot(), &items);

        assert_eq!(doc.subtotal_text(), "$200.00");
        assert_eq!(doc.tax_amount_text(), "$20.00");
        assert_eq!(doc.total_text(), "$220.00");
        assert!(doc.shows_tax_line());
    }

    #[test]
    fn hides_tax_line_without_tax() {
        let mut fields = snapshot();
        fields.set(FormField::TaxRate, "0");

        let doc = InvoiceDocument::build(
            &fields,
            &[LineItem::with_values(LineItemId(1), "Design", "1", "100")],
        );

        assert!(!doc.shows_tax_line());
    }

    #[test]
    fn unparseable_rate_renders_as_zero() {
        let doc = InvoiceDocument::build(
            &snapshot(),
            &[LineItem::with_values(LineItemId(1), "Mystery", "1", "abc")],
        );

        assert_eq!(doc.lines()[0].rate, "$0.00");
        assert_eq!(doc.lines()[0].amount, "$0.00");
    }

    #[test]
    fn negative_rate_renders_as_zero() {
        let doc = InvoiceDocument::build(
            &snapshot(),
            &[LineItem::with_values(LineItemId(1), "Refund", "1", "-10")],
        );

        assert_eq!(doc.lines()[0].rate, "$0.00");
        assert_eq!(doc.lines()[0].amount, "$0.00");
    }

    #[test]
    fn contact_lines_skip_blank_fields() {
        let doc = InvoiceDocument::build(&snapshot(), &[]);

        assert_eq!(
            doc.company_contact_lines(),
            vec![(FormField::CompanyPhone, "+1 555 0100")]
        );
        assert!(doc.client_contact_lines().is_empty());
    }
}
