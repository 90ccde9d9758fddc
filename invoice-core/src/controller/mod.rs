//! The invoice form as an explicit state machine.
//!
//! [`InvoiceController`] owns the form fields and the rows. Each user action
//! arrives as an [`InvoiceEvent`]; handling it updates the state and returns
//! an [`Outcome`] describing what the presentation layer should redraw,
//! which side-effects to run and which messages to show.

mod event;
mod invoice;
mod outcome;

pub use event::{InvoiceEvent, KeyChord, ShortcutAction};
pub use invoice::{InvoiceController, RESET_MESSAGE, SAVED_MESSAGE};
pub use outcome::{DisplayUpdate, Effect, Outcome};
