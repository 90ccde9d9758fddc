//! SQLite backend for the invoice form-state store.
//!
//! Values live in a single `kv_store` table keyed by name; the table is
//! created by the bundled migrations when the repository is opened through
//! [`SqliteRepositoryFactory`].

pub mod factory;
pub mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
