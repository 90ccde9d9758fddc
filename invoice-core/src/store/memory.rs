use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::factory::{RepositoryFactory, StoreConfig};
use super::repository::{RepositoryError, StateRepository};

/// In-process store. Contents are lost when the repository is dropped.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, RepositoryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::Storage(format!("memory store poisoned: {e}")))?;
        Ok(f(&mut entries))
    }
}

#[async_trait]
impl StateRepository for MemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend.
///
/// The connection string is ignored; every call yields a fresh, empty store.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, _config: &StoreConfig) -> Result<Box<dyn StateRepository>, RepositoryError> {
        Ok(Box::new(MemoryRepository::new()))
    }
}
