//! Required-field checks run before preview, print and export.
//!
//! Validation is advisory: it reports problems and lets the caller decide
//! whether to block an action. It never changes the form.

use crate::{FormField, FormSnapshot, LineItem, LineItemColumn, LineItemId, Notification};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
pub const NO_LINE_ITEMS_MESSAGE: &str = "Please add at least one service item.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A required form field is blank.
    MissingField(FormField),

    /// A cell of a row is blank.
    MissingLineValue {
        id: LineItemId,
        column: LineItemColumn,
    },

    /// No row has a description.
    NoLineItems,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Messages to show when an action is blocked.
    ///
    /// The line-item message comes first when it applies, followed by the
    /// general required-fields message.
    pub fn notifications(&self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        if self.issues.contains(&ValidationIssue::NoLineItems) {
            notifications.push(Notification::error(NO_LINE_ITEMS_MESSAGE));
        }
        if !self.issues.is_empty() {
            notifications.push(Notification::error(MISSING_FIELDS_MESSAGE));
        }
        notifications
    }
}

pub fn validate(
    snapshot: &FormSnapshot,
    items: &[LineItem],
) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = FormField::ALL
        .into_iter()
        .filter(|field| field.is_required() && snapshot.get(*field).trim().is_empty())
        .map(ValidationIssue::MissingField)
        .collect();

    for item in items {
        for column in [
            LineItemColumn::Description,
            LineItemColumn::Quantity,
            LineItemColumn::Rate,
        ] {
            if item.get(column).trim().is_empty() {
                issues.push(ValidationIssue::MissingLineValue {
                    id: item.id,
                    column,
                });
            }
        }
    }

    if !items.iter().any(|item| !item.description.trim().is_empty()) {
        issues.push(ValidationIssue::NoLineItems);
    }

    ValidationReport { issues }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn complete_snapshot() -> FormSnapshot {
        let mut snapshot = FormSnapshot::new();
        snapshot.set(FormField::CompanyName, "Acme");
        snapshot.set(FormField::ClientName, "Jane");
        snapshot.set(FormField::InvoiceNumber, "INV-1");
        snapshot.set(FormField::InvoiceDate, "2025-01-01");
        snapshot.set(FormField::DueDate, "2025-01-31");
        snapshot
    }

    fn row(
        id: u64,
        description: &str,
        quantity: &str,
        rate: &str,
    ) -> LineItem {
        LineItem::with_values(LineItemId(id), description, quantity, rate)
    }

    #[test]
    fn complete_form_is_valid() {
        let report = validate(&complete_snapshot(), &[row(1, "Design", "1", "100")]);

        assert!(report.is_valid());
        assert!(report.notifications().is_empty());
    }

    #[test]
    fn blank_required_field_is_reported() {
        let mut snapshot = complete_snapshot();
        snapshot.set(FormField::ClientName, "   ");

        let report = validate(&snapshot, &[row(1, "Design", "1", "100")]);

        assert_eq!(report.issues(), &[ValidationIssue::MissingField(FormField::ClientName)]);
        assert_eq!(report.notifications(), vec![Notification::error(MISSING_FIELDS_MESSAGE)]);
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let mut snapshot = complete_snapshot();
        snapshot.set(FormField::Notes, "");
        snapshot.set(FormField::ClientEmail, "");

        assert!(validate(&snapshot, &[row(1, "Design", "1", "100")]).is_valid());
    }

    #[test]
    fn blank_row_cells_are_reported() {
        let report = validate(&complete_snapshot(), &[row(1, "Design", "1", "100"), row(2, "Extra", "", "")]);

        assert_eq!(
            report.issues(),
            &[
                ValidationIssue::MissingLineValue {
                    id: LineItemId(2),
                    column: LineItemColumn::Quantity,
                },
                ValidationIssue::MissingLineValue {
                    id: LineItemId(2),
                    column: LineItemColumn::Rate,
                },
            ]
        );
    }

    #[test]
    fn no_described_rows_reports_both_messages() {
        let report = validate(&complete_snapshot(), &[row(1, "", "1", "")]);

        assert!(report.issues().contains(&ValidationIssue::NoLineItems));
        assert_eq!(
            report.notifications(),
            vec![
                Notification::error(NO_LINE_ITEMS_MESSAGE),
                Notification::error(MISSING_FIELDS_MESSAGE),
            ]
        );
    }

    #[test]
    fn empty_row_list_is_invalid() {
        let report = validate(&complete_snapshot(), &[]);

        assert_eq!(report.issues(), &[ValidationIssue::NoLineItems]);
    }
}
