//! Plain-text rendering of an [`InvoiceDocument`].

use std::fmt::Write;

use chrono::NaiveDate;
use invoice_core::FormField;
use invoice_core::document::InvoiceDocument;

const DESCRIPTION_WIDTH: usize = 32;
const QUANTITY_WIDTH: usize = 8;
const MONEY_WIDTH: usize = 14;
const TOTALS_LABEL_WIDTH: usize = 4 + DESCRIPTION_WIDTH + QUANTITY_WIDTH + MONEY_WIDTH;

/// Renders the invoice as fixed-width text, one line per printed row.
pub fn render_text(document: &InvoiceDocument) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, document);
    out
}

fn write_document(
    out: &mut String,
    doc: &InvoiceDocument,
) -> std::fmt::Result {
    writeln!(out, "{}", doc.field(FormField::CompanyName))?;
    for (_, value) in doc.company_contact_lines() {
        writeln!(out, "{value}")?;
    }
    writeln!(out)?;

    writeln!(out, "INVOICE")?;
    writeln!(out, "Invoice #: {}", doc.field(FormField::InvoiceNumber))?;
    writeln!(out, "Date:      {}", long_date(doc.field(FormField::InvoiceDate)))?;
    writeln!(out, "Due:       {}", long_date(doc.field(FormField::DueDate)))?;
    writeln!(out, "Status:    {}", doc.field(FormField::Status))?;
    writeln!(out)?;

    writeln!(out, "Bill To:")?;
    writeln!(out, "{}", doc.field(FormField::ClientName))?;
    for (_, value) in doc.client_contact_lines() {
        writeln!(out, "{value}")?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:<4}{:<dw$}{:>qw$}{:>mw$}{:>mw$}",
        "#",
        "Description",
        "Qty",
        "Rate",
        "Amount",
        dw = DESCRIPTION_WIDTH,
        qw = QUANTITY_WIDTH,
        mw = MONEY_WIDTH,
    )?;
    writeln!(out, "{}", "-".repeat(TOTALS_LABEL_WIDTH + MONEY_WIDTH))?;
    for line in doc.lines() {
        writeln!(
            out,
            "{:<4}{:<dw$}{:>qw$}{:>mw$}{:>mw$}",
            line.number,
            line.description,
            line.quantity,
            line.rate,
            line.amount,
            dw = DESCRIPTION_WIDTH,
            qw = QUANTITY_WIDTH,
            mw = MONEY_WIDTH,
        )?;
    }
    writeln!(out)?;

    write_total(out, "Subtotal:", &doc.subtotal_text())?;
    if doc.shows_tax_line() {
        let label = format!("Tax ({}%):", doc.totals().tax_rate.normalize());
        write_total(out, &label, &doc.tax_amount_text())?;
    }
    write_total(out, "Total:", &doc.total_text())?;

    let notes = doc.field(FormField::Notes).trim();
    if !notes.is_empty() {
        writeln!(out)?;
        writeln!(out, "Notes:")?;
        writeln!(out, "{notes}")?;
    }
    Ok(())
}

/// `2025-06-01` as `June 1, 2025`; anything unparseable is shown as typed.
fn long_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn write_total(
    out: &mut String,
    label: &str,
    amount: &str,
) -> std::fmt::Result {
    writeln!(
        out,
        "{:>lw$}{:>mw$}",
        label,
        amount,
        lw = TOTALS_LABEL_WIDTH,
        mw = MONEY_WIDTH,
    )
}
