use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// String key-value persistence, the only storage the form needs.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Stores `value` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}
