//! Persistence of the non-line-item form fields.
//!
//! The whole snapshot is written as a single JSON object under one key,
//! e.g. `{"companyName":"Acme","currency":"$","taxRate":"10",...}`.
//! Loading is forgiving: unknown keys are skipped and a missing or corrupt
//! value leaves the form untouched. Line items are never stored.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::repository::{RepositoryError, StateRepository};
use crate::{FormField, FormSnapshot};

/// Key the snapshot is stored under.
pub const STORAGE_KEY: &str = "invoiceFormData";

/// Why a stored value could not be turned back into field values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotDecodeError {
    #[error("stored snapshot is not valid JSON: {0}")]
    Json(String),

    #[error("stored snapshot is not a JSON object")]
    NotAnObject,
}

/// Serializes every field of `snapshot` into the stored JSON form.
pub fn encode_snapshot(snapshot: &FormSnapshot) -> Result<String, RepositoryError> {
    serde_json::to_string(&snapshot.to_key_map())
        .map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Extracts known fields from a stored JSON value.
///
/// String values are taken as-is and numbers are rendered to text. Keys that
/// do not name a [`FormField`], and values of any other JSON type, are
/// skipped.
pub fn decode_snapshot(raw: &str) -> Result<Vec<(FormField, String)>, SnapshotDecodeError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SnapshotDecodeError::Json(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(SnapshotDecodeError::NotAnObject);
    };

    let mut fields = Vec::with_capacity(map.len());
    for (key, value) in map {
        let Some(field) = FormField::from_key(&key) else {
            debug!(key = %key, "ignoring unknown snapshot key");
            continue;
        };
        match value {
            Value::String(s) => fields.push((field, s)),
            Value::Number(n) => fields.push((field, n.to_string())),
            other => warn!(key = %key, kind = json_kind(&other), "ignoring non-scalar snapshot value"),
        }
    }
    Ok(fields)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Saves, restores and clears the form snapshot through a [`StateRepository`].
pub struct FormStateStore {
    repo: Box<dyn StateRepository>,
    key: String,
}

impl FormStateStore {
    /// A store writing under [`STORAGE_KEY`].
    pub fn new(repo: Box<dyn StateRepository>) -> Self {
        Self::with_key(repo, STORAGE_KEY)
    }

    pub fn with_key(
        repo: Box<dyn StateRepository>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the full snapshot, replacing any previous one.
    pub async fn save(
        &self,
        snapshot: &FormSnapshot,
    ) -> Result<(), RepositoryError> {
        let encoded = encode_snapshot(snapshot)?;
        self.repo.set(&self.key, &encoded).await?;
        debug!(key = %self.key, bytes = encoded.len(), "form snapshot saved");
        Ok(())
    }

    /// Restores stored values into `snapshot`, returning how many fields
    /// were assigned.
    ///
    /// Never fails: a missing key, a storage error or a corrupt value is
    /// logged and leaves `snapshot` exactly as it was.
    pub async fn load(
        &self,
        snapshot: &mut FormSnapshot,
    ) -> usize {
        let raw = match self.repo.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no saved form snapshot");
                return 0;
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "could not read saved form snapshot");
                return 0;
            }
        };

        match decode_snapshot(&raw) {
            Ok(fields) => {
                let restored = fields.len();
                for (field, value) in fields {
                    snapshot.set(field, value);
                }
                info!(key = %self.key, restored, "form snapshot restored");
                restored
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "error loading saved data, keeping defaults");
                0
            }
        }
    }

    /// Deletes the stored snapshot.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.repo.remove(&self.key).await?;
        info!(key = %self.key, "form snapshot cleared");
        Ok(())
    }
}
