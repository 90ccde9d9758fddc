use crate::{FormField, LineItemColumn, LineItemId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceEvent {
    FieldEdited { field: FormField, value: String },
    LineItemAdded,
    LineItemRemoved(LineItemId),
    LineItemEdited {
        id: LineItemId,
        column: LineItemColumn,
        value: String,
    },
    PreviewRequested,
    PrintRequested,
    ExportRequested,
    ClosePreview,
    /// Explicit save, on top of the automatic one after each field edit.
    SaveRequested,
    /// A confirmed reset of the whole form.
    ResetRequested,
    Shortcut(KeyChord),
}

/// A key press together with whether Ctrl (or Cmd) was held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub ctrl_or_meta: bool,
    pub key: String,
}

impl KeyChord {
    pub fn new(
        ctrl_or_meta: bool,
        key: impl Into<String>,
    ) -> Self {
        Self {
            ctrl_or_meta,
            key: key.into(),
        }
    }

    /// Ctrl/Cmd+Enter previews, Ctrl/Cmd+P prints, Ctrl/Cmd+S saves.
    pub fn action(&self) -> Option<ShortcutAction> {
        if !self.ctrl_or_meta {
            return None;
        }
        match self.key.as_str() {
            "Enter" => Some(ShortcutAction::Preview),
            "p" => Some(ShortcutAction::Print),
            "s" => Some(ShortcutAction::Save),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Preview,
    Print,
    Save,
}
