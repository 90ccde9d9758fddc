use std::fmt;

use serde::{Deserialize, Serialize};

/// Quantity a freshly added row starts with.
pub const DEFAULT_QUANTITY: &str = "1";

/// Stable identity of a row, independent of its position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineItemId(pub u64);

impl fmt::Display for LineItemId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The editable cells of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineItemColumn {
    Description,
    Quantity,
    Rate,
}

impl LineItemColumn {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Quantity => "Quantity",
            Self::Rate => "Rate",
        }
    }
}

/// One billable row, holding exactly what the user typed.
///
/// Quantity and rate stay as raw strings; the amount is derived on demand
/// (see [`crate::calculations::line_amount`]) and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub description: String,
    pub quantity: String,
    pub rate: String,
}

impl LineItem {
    /// A blank row: no description, quantity `1`, no rate.
    pub fn new(id: LineItemId) -> Self {
        Self {
            id,
            description: String::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
            rate: String::new(),
        }
    }

    pub fn with_values(
        id: LineItemId,
        description: impl Into<String>,
        quantity: impl Into<String>,
        rate: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            quantity: quantity.into(),
            rate: rate.into(),
        }
    }

    pub fn get(
        &self,
        column: LineItemColumn,
    ) -> &str {
        match column {
            LineItemColumn::Description => &self.description,
            LineItemColumn::Quantity => &self.quantity,
            LineItemColumn::Rate => &self.rate,
        }
    }

    pub fn set(
        &mut self,
        column: LineItemColumn,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match column {
            LineItemColumn::Description => self.description = value,
            LineItemColumn::Quantity => self.quantity = value,
            LineItemColumn::Rate => self.rate = value,
        }
    }

    /// True when description, quantity and rate are all filled in.
    pub fn is_complete(&self) -> bool {
        !self.description.trim().is_empty()
            && !self.quantity.trim().is_empty()
            && !self.rate.trim().is_empty()
    }
}
