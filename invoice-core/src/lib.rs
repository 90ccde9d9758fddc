pub mod calculations;
pub mod controller;
pub mod document;
pub mod export;
pub mod models;
pub mod store;
pub mod validation;

pub use controller::{InvoiceController, InvoiceEvent, Outcome};
pub use models::*;
pub use store::{FormStateStore, RepositoryError, StateRepository};
