use async_trait::async_trait;
use tracing::debug;

use super::form_state::{FormStateStore, STORAGE_KEY};
use super::repository::{RepositoryError, StateRepository};

/// Where the form snapshot lives.
///
/// | backend  | `connection_string`                  |
/// |----------|--------------------------------------|
/// | `memory` | unused; state is lost on exit        |
/// | `sqlite` | `invoice.db`, `:memory:`             |
///
/// Backend names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
    /// Key the snapshot is written under; [`STORAGE_KEY`] unless overridden.
    pub snapshot_key: String,
}

impl StoreConfig {
    pub fn new(
        backend: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            connection_string: connection_string.into(),
            snapshot_key: STORAGE_KEY.to_string(),
        }
    }

    pub fn with_snapshot_key(
        mut self,
        key: impl Into<String>,
    ) -> Self {
        self.snapshot_key = key.into();
        self
    }

    fn names(
        &self,
        backend: &str,
    ) -> bool {
        self.backend.trim().eq_ignore_ascii_case(backend)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("memory", "")
    }
}

/// Opens one kind of key-value backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase name used in [`StoreConfig::backend`].
    fn backend_name(&self) -> &'static str;

    /// Returns a repository that is ready for reads and writes, running any
    /// schema setup first.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn StateRepository>, RepositoryError>;
}

/// The backends a binary was built with, in registration order.
#[derive(Default)]
pub struct BackendRegistry {
    factories: Vec<Box<dyn RepositoryFactory>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`, replacing an earlier one with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) -> &mut Self {
        self.factories
            .retain(|existing| existing.backend_name() != factory.backend_name());
        self.factories.push(factory);
        self
    }

    pub fn backends(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.backend_name()).collect()
    }

    /// Opens the repository named by `config.backend`.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn StateRepository>, RepositoryError> {
        let Some(factory) = self.factories.iter().find(|f| config.names(f.backend_name())) else {
            return Err(RepositoryError::Configuration(format!(
                "unknown store backend '{}' (built with: {})",
                config.backend,
                self.backends().join(", ")
            )));
        };
        debug!(backend = factory.backend_name(), "opening store backend");
        factory.create(config).await
    }

    /// Opens the backend and binds it to the configured snapshot key.
    pub async fn open_form_store(
        &self,
        config: &StoreConfig,
    ) -> Result<FormStateStore, RepositoryError> {
        let repo = self.create(config).await?;
        Ok(FormStateStore::with_key(repo, config.snapshot_key.clone()))
    }
}
