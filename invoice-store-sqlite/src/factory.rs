use async_trait::async_trait;

use invoice_core::store::{RepositoryFactory, StoreConfig};
use invoice_core::{RepositoryError, StateRepository};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`invoice_core::store::BackendRegistry`] to make
/// the `"sqlite"` backend available:
///
/// ```rust,no_run
/// use invoice_core::store::BackendRegistry;
/// use invoice_store_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = BackendRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted connection-string values:
    /// * A bare file path such as `"invoice.db"`. The file is created if it
    ///   does not exist.
    /// * `":memory:"` for an ephemeral in-memory database.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn StateRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string).await?;
        repo.run_migrations().await?;
        Ok(Box::new(repo))
    }
}
