pub mod app;
pub mod config;
pub mod csv_loader;
pub mod exporter;
pub mod logging;
pub mod preview;

pub use app::{InvoiceSession, build_registry};
pub use config::AppConfig;
