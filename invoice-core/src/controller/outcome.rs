use crate::{FormField, LineItemId, Notification};

/// A change the presentation layer should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayUpdate {
    /// Show a field's (new) value, e.g. after a reset.
    FieldValue { field: FormField, value: String },
    LineItemInserted(LineItemId),
    LineItemDeleted(LineItemId),
    /// The formatted amount of one row.
    LineAmount { id: LineItemId, text: String },
    Subtotal(String),
    TaxAmount(String),
    Total(String),
}

/// Work the caller must carry out after a handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SaveSnapshot,
    ClearSnapshot,
    ShowPreview,
    HidePreview,
    Print,
    /// Export under `<file_stem>.<extension>`.
    Export { file_stem: String },
}

/// Everything produced by handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub updates: Vec<DisplayUpdate>,
    pub effects: Vec<Effect>,
    pub notifications: Vec<Notification>,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.effects.is_empty() && self.notifications.is_empty()
    }

    pub fn has_effect(
        &self,
        effect: &Effect,
    ) -> bool {
        self.effects.contains(effect)
    }
}
