use chrono::NaiveDate;
use tracing::{debug, info};

use super::event::{InvoiceEvent, ShortcutAction};
use super::outcome::{DisplayUpdate, Effect, Outcome};
use crate::calculations::{LineAmount, TotalsCalculator, format_currency};
use crate::document::InvoiceDocument;
use crate::export::export_file_stem;
use crate::validation::{ValidationReport, validate};
use crate::{
    CurrencySymbol, FormDefaults, FormField, FormSnapshot, InvoiceTotals, LineItem, LineItemColumn,
    LineItemId, Notification,
};

pub const SAVED_MESSAGE: &str = "Form data saved!";
pub const RESET_MESSAGE: &str = "Form reset successfully!";

/// Owner of the whole form state.
///
/// Totals are never stored here; they are derived from the rows and the
/// tax-rate field whenever they are needed.
#[derive(Debug, Clone)]
pub struct InvoiceController {
    defaults: FormDefaults,
    today: NaiveDate,
    snapshot: FormSnapshot,
    items: Vec<LineItem>,
    next_id: u64,
    preview_open: bool,
}

impl InvoiceController {
    /// A fresh form for `today` with one blank row.
    pub fn new(
        defaults: FormDefaults,
        today: NaiveDate,
    ) -> Self {
        let snapshot = FormSnapshot::with_defaults(&defaults, today);
        let mut controller = Self {
            defaults,
            today,
            snapshot,
            items: Vec::new(),
            next_id: 1,
            preview_open: false,
        };
        controller.push_blank_row();
        controller
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    /// Mutable access for restoring a saved snapshot at startup.
    pub fn snapshot_mut(&mut self) -> &mut FormSnapshot {
        &mut self.snapshot
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn line_item(
        &self,
        id: LineItemId,
    ) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn currency(&self) -> CurrencySymbol {
        self.snapshot.currency()
    }

    pub fn totals(&self) -> InvoiceTotals {
        TotalsCalculator::new(&self.items).calculate(self.snapshot.get(FormField::TaxRate))
    }

    pub fn line_amount(
        &self,
        id: LineItemId,
    ) -> Option<LineAmount> {
        self.line_item(id).map(LineAmount::of)
    }

    pub fn document(&self) -> InvoiceDocument {
        InvoiceDocument::build(&self.snapshot, &self.items)
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.snapshot, &self.items)
    }

    pub fn is_preview_open(&self) -> bool {
        self.preview_open
    }

    /// Replaces every row with `rows` of `(description, quantity, rate)`.
    pub fn replace_line_items<I, S>(
        &mut self,
        rows: I,
    ) -> Outcome
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let mut outcome = Outcome::default();
        for item in self.items.drain(..) {
            outcome.updates.push(DisplayUpdate::LineItemDeleted(item.id));
        }
        for (description, quantity, rate) in rows {
            let id = self.allocate_id();
            self.items
                .push(LineItem::with_values(id, description, quantity, rate));
            outcome.updates.push(DisplayUpdate::LineItemInserted(id));
        }
        debug!(rows = self.items.len(), "line items replaced");
        outcome.updates.extend(self.refresh().updates);
        outcome
    }

    /// Every row amount and all three totals, formatted for display.
    pub fn refresh(&self) -> Outcome {
        let currency = self.currency();
        let mut updates: Vec<DisplayUpdate> = self
            .items
            .iter()
            .map(|item| self.line_amount_update(item, currency))
            .collect();
        updates.extend(self.totals_updates());
        Outcome {
            updates,
            ..Default::default()
        }
    }

    pub fn handle(
        &mut self,
        event: InvoiceEvent,
    ) -> Outcome {
        debug!(?event, "handling invoice event");
        match event {
            InvoiceEvent::FieldEdited { field, value } => self.edit_field(field, value),
            InvoiceEvent::LineItemAdded => self.add_line_item(),
            InvoiceEvent::LineItemRemoved(id) => self.remove_line_item(id),
            InvoiceEvent::LineItemEdited { id, column, value } => {
                self.edit_line_item(id, column, value)
            }
            InvoiceEvent::PreviewRequested => self.request_preview(),
            InvoiceEvent::PrintRequested => self.request_print(),
            InvoiceEvent::ExportRequested => self.request_export(),
            InvoiceEvent::ClosePreview => {
                self.preview_open = false;
                Outcome {
                    effects: vec![Effect::HidePreview],
                    ..Default::default()
                }
            }
            InvoiceEvent::SaveRequested => Self::save(),
            InvoiceEvent::ResetRequested => self.reset(),
            InvoiceEvent::Shortcut(chord) => match chord.action() {
                Some(ShortcutAction::Preview) => self.request_preview(),
                Some(ShortcutAction::Print) => self.request_print(),
                Some(ShortcutAction::Save) => Self::save(),
                None => Outcome::default(),
            },
        }
    }

    // ── handlers ─────────────────────────────────────────────────────────

    fn edit_field(
        &mut self,
        field: FormField,
        value: String,
    ) -> Outcome {
        self.snapshot.set(field, value);

        let mut outcome = match field {
            FormField::Currency => self.refresh(),
            FormField::TaxRate => Outcome {
                updates: self.totals_updates(),
                ..Default::default()
            },
            _ => Outcome::default(),
        };
        outcome.effects.push(Effect::SaveSnapshot);
        outcome
    }

    fn add_line_item(&mut self) -> Outcome {
        let id = self.push_blank_row();
        let currency = self.currency();
        let mut updates = vec![DisplayUpdate::LineItemInserted(id)];
        if let Some(item) = self.line_item(id) {
            updates.push(self.line_amount_update(item, currency));
        }
        updates.extend(self.totals_updates());
        Outcome {
            updates,
            ..Default::default()
        }
    }

    fn remove_line_item(
        &mut self,
        id: LineItemId,
    ) -> Outcome {
        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            debug!(%id, "remove for unknown line item ignored");
            return Outcome::default();
        };
        self.items.remove(position);

        let mut updates = vec![DisplayUpdate::LineItemDeleted(id)];
        updates.extend(self.totals_updates());
        Outcome {
            updates,
            ..Default::default()
        }
    }

    fn edit_line_item(
        &mut self,
        id: LineItemId,
        column: LineItemColumn,
        value: String,
    ) -> Outcome {
        let currency = self.currency();
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!(%id, "edit for unknown line item ignored");
            return Outcome::default();
        };
        item.set(column, value);

        if column == LineItemColumn::Description {
            return Outcome::default();
        }

        let item = item.clone();
        let mut updates = vec![self.line_amount_update(&item, currency)];
        updates.extend(self.totals_updates());
        Outcome {
            updates,
            ..Default::default()
        }
    }

    fn request_preview(&mut self) -> Outcome {
        match self.blocked_by_validation() {
            Some(outcome) => outcome,
            None => {
                self.preview_open = true;
                Outcome {
                    effects: vec![Effect::ShowPreview],
                    ..Default::default()
                }
            }
        }
    }

    fn request_print(&mut self) -> Outcome {
        match self.blocked_by_validation() {
            Some(outcome) => outcome,
            None => {
                self.preview_open = true;
                Outcome {
                    effects: vec![Effect::Print],
                    ..Default::default()
                }
            }
        }
    }

    fn request_export(&self) -> Outcome {
        if let Some(outcome) = self.blocked_by_validation() {
            return outcome;
        }
        let file_stem = export_file_stem(
            self.snapshot.get(FormField::InvoiceNumber),
            self.snapshot.get(FormField::ClientName),
        );
        Outcome {
            effects: vec![Effect::Export { file_stem }],
            ..Default::default()
        }
    }

    fn save() -> Outcome {
        Outcome {
            effects: vec![Effect::SaveSnapshot],
            notifications: vec![Notification::success(SAVED_MESSAGE)],
            ..Default::default()
        }
    }

    fn reset(&mut self) -> Outcome {
        let mut updates: Vec<DisplayUpdate> = self
            .items
            .drain(..)
            .map(|item| DisplayUpdate::LineItemDeleted(item.id))
            .collect();

        self.snapshot = FormSnapshot::with_defaults(&self.defaults, self.today);
        self.preview_open = false;
        let id = self.push_blank_row();

        updates.extend(self.snapshot.iter().map(|(field, value)| DisplayUpdate::FieldValue {
            field,
            value: value.to_string(),
        }));
        updates.push(DisplayUpdate::LineItemInserted(id));
        updates.extend(self.refresh().updates);

        info!("invoice form reset");
        Outcome {
            updates,
            effects: vec![Effect::HidePreview, Effect::ClearSnapshot],
            notifications: vec![Notification::success(RESET_MESSAGE)],
        }
    }

    // ── helpers ──────────────────────────────────────────────────────────

    fn blocked_by_validation(&self) -> Option<Outcome> {
        let report = self.validate();
        if report.is_valid() {
            return None;
        }
        debug!(issues = report.issues().len(), "action blocked by validation");
        Some(Outcome {
            notifications: report.notifications(),
            ..Default::default()
        })
    }

    fn allocate_id(&mut self) -> LineItemId {
        let id = LineItemId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_blank_row(&mut self) -> LineItemId {
        let id = self.allocate_id();
        self.items.push(LineItem::new(id));
        id
    }

    fn line_amount_update(
        &self,
        item: &LineItem,
        currency: CurrencySymbol,
    ) -> DisplayUpdate {
        DisplayUpdate::LineAmount {
            id: item.id,
            text: format_currency(LineAmount::of(item).value(), currency),
        }
    }

    fn totals_updates(&self) -> Vec<DisplayUpdate> {
        let currency = self.currency();
        let totals = self.totals();
        vec![
            DisplayUpdate::Subtotal(format_currency(totals.subtotal, currency)),
            DisplayUpdate::TaxAmount(format_currency(totals.tax_amount, currency)),
            DisplayUpdate::Total(format_currency(totals.total, currency)),
        ]
    }
}
