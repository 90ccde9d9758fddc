//! `invoice.toml` application settings.
//!
//! ```toml
//! currency = "$"
//!
//! [store]
//! backend = "sqlite"
//! connection_string = "invoice.db"
//!
//! [logging]
//! level = "debug"
//! file = "invoice.log"
//!
//! [company]
//! name = "Acme Studio"
//! website = "acme.example"
//! address = "1 Main St"
//! phone = "+1 555 0100"
//! email = "billing@acme.example"
//! email2 = "ops@acme.example"
//! ```
//!
//! Every key is optional. A missing file yields [`AppConfig::default`].

use std::io;
use std::path::{Path, PathBuf};

use invoice_core::store::StoreConfig;
use invoice_core::{CurrencySymbol, FormDefaults};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "invoice.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub currency: CurrencySymbol,
    pub store: StoreSection,
    pub logging: LoggingSection,
    pub company: CompanySection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "invoice.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// EnvFilter directive. `None` keeps `RUST_LOG` or the built-in default.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

/// Issuer details pre-filled into every new or reset form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanySection {
    pub name: String,
    pub website: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub email2: String,
}

impl AppConfig {
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "config file loaded");
                Self::from_toml_str(&contents, path)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            company_name: self.company.name.clone(),
            company_website: self.company.website.clone(),
            company_address: self.company.address.clone(),
            company_phone: self.company.phone.clone(),
            company_email: self.company.email.clone(),
            company_email2: self.company.email2.clone(),
            currency: self.currency,
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.store.backend, &self.store.connection_string)
    }
}
