use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{CurrencySymbol, FormField};

/// Number of days between the invoice date and the default due date.
const PAYMENT_TERM_DAYS: u64 = 30;

/// Status every new invoice starts in.
const DEFAULT_STATUS: &str = "Pending";

/// Values a blank or reset form is populated with.
///
/// Only the issuing company and the currency are configurable; client
/// details always start empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub company_name: String,
    pub company_website: String,
    pub company_address: String,
    pub company_phone: String,
    pub company_email: String,
    pub company_email2: String,
    pub currency: CurrencySymbol,
}

/// Flat record of every non-line-item form field.
///
/// Fields that were never set read as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    values: BTreeMap<FormField, String>,
}

impl FormSnapshot {
    /// An entirely empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot a fresh form shows on `today`.
    ///
    /// The invoice number is `INV-YYYYMMDD-001`, the due date is thirty days
    /// out and the tax rate is zero.
    pub fn with_defaults(
        defaults: &FormDefaults,
        today: NaiveDate,
    ) -> Self {
        let due = today
            .checked_add_days(Days::new(PAYMENT_TERM_DAYS))
            .unwrap_or(today);

        let mut snapshot = Self {
            values: FormField::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        };
        snapshot.set(FormField::CompanyName, defaults.company_name.as_str());
        snapshot.set(FormField::CompanyWebsite, defaults.company_website.as_str());
        snapshot.set(FormField::CompanyAddress, defaults.company_address.as_str());
        snapshot.set(FormField::CompanyPhone, defaults.company_phone.as_str());
        snapshot.set(FormField::CompanyEmail, defaults.company_email.as_str());
        snapshot.set(FormField::CompanyEmail2, defaults.company_email2.as_str());
        snapshot.set(
            FormField::InvoiceNumber,
            format!("INV-{}-001", today.format("%Y%m%d")),
        );
        snapshot.set(FormField::InvoiceDate, today.format("%Y-%m-%d").to_string());
        snapshot.set(FormField::DueDate, due.format("%Y-%m-%d").to_string());
        snapshot.set(FormField::Status, DEFAULT_STATUS);
        snapshot.set(FormField::Currency, defaults.currency.to_string());
        snapshot.set(FormField::TaxRate, "0");
        snapshot
    }

    pub fn get(
        &self,
        field: FormField,
    ) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) {
        self.values.insert(field, value.into());
    }

    /// The currency symbol in effect, falling back to the default glyph
    /// when the field is blank.
    pub fn currency(&self) -> CurrencySymbol {
        CurrencySymbol::parse(self.get(FormField::Currency)).unwrap_or_default()
    }

    /// All known fields with their current values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        FormField::ALL.into_iter().map(|field| (field, self.get(field)))
    }

    /// Key → value map suitable for serialization.
    pub fn to_key_map(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, value)| (field.key(), value.to_string()))
            .collect()
    }
}
