use serde::{Deserialize, Serialize};

/// Every named, non-line-item field of the invoice form.
///
/// The persisted key of each field is its camelCase name, which is also
/// the key used inside the stored JSON snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormField {
    CompanyName,
    CompanyWebsite,
    CompanyAddress,
    CompanyPhone,
    CompanyEmail,
    CompanyEmail2,
    ClientName,
    ClientEmail,
    ClientAddress,
    ClientPhone,
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    Status,
    Currency,
    TaxRate,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 17] = [
        Self::CompanyName,
        Self::CompanyWebsite,
        Self::CompanyAddress,
        Self::CompanyPhone,
        Self::CompanyEmail,
        Self::CompanyEmail2,
        Self::ClientName,
        Self::ClientEmail,
        Self::ClientAddress,
        Self::ClientPhone,
        Self::InvoiceNumber,
        Self::InvoiceDate,
        Self::DueDate,
        Self::Status,
        Self::Currency,
        Self::TaxRate,
        Self::Notes,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::CompanyWebsite => "companyWebsite",
            Self::CompanyAddress => "companyAddress",
            Self::CompanyPhone => "companyPhone",
            Self::CompanyEmail => "companyEmail",
            Self::CompanyEmail2 => "companyEmail2",
            Self::ClientName => "clientName",
            Self::ClientEmail => "clientEmail",
            Self::ClientAddress => "clientAddress",
            Self::ClientPhone => "clientPhone",
            Self::InvoiceNumber => "invoiceNumber",
            Self::InvoiceDate => "invoiceDate",
            Self::DueDate => "dueDate",
            Self::Status => "status",
            Self::Currency => "currency",
            Self::TaxRate => "taxRate",
            Self::Notes => "notes",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "Company name",
            Self::CompanyWebsite => "Company website",
            Self::CompanyAddress => "Company address",
            Self::CompanyPhone => "Company phone",
            Self::CompanyEmail => "Company email",
            Self::CompanyEmail2 => "Company email (secondary)",
            Self::ClientName => "Client name",
            Self::ClientEmail => "Client email",
            Self::ClientAddress => "Client address",
            Self::ClientPhone => "Client phone",
            Self::InvoiceNumber => "Invoice number",
            Self::InvoiceDate => "Invoice date",
            Self::DueDate => "Due date",
            Self::Status => "Status",
            Self::Currency => "Currency",
            Self::TaxRate => "Tax rate (%)",
            Self::Notes => "Notes",
        }
    }

    /// Fields that must be non-blank before the invoice can be previewed.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Self::CompanyName
                | Self::ClientName
                | Self::InvoiceNumber
                | Self::InvoiceDate
                | Self::DueDate
        )
    }
}
