mod currency;
mod form_field;
mod form_snapshot;
mod invoice_totals;
mod line_item;
mod notification;

pub use currency::{CurrencySymbol, DEFAULT_CURRENCY_SYMBOL};
pub use form_field::FormField;
pub use form_snapshot::{FormDefaults, FormSnapshot};
pub use invoice_totals::InvoiceTotals;
pub use line_item::{DEFAULT_QUANTITY, LineItem, LineItemColumn, LineItemId};
pub use notification::{Notification, NotificationKind};
