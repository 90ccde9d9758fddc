//! CSV loader for invoice line items.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Names are
//! case-sensitive.
//!
//! | Column        | Required | Notes                                     |
//! |---------------|----------|-------------------------------------------|
//! | `description` | yes      | free text                                 |
//! | `quantity`    | yes      | kept as typed; non-numbers compute to 0   |
//! | `rate`        | yes      | kept as typed; non-numbers compute to 0   |
//!
//! Cells are not validated here. A row like `Consulting,abc,10` loads and
//! shows an amount of zero, the same as typing it into the form.
//!
//! ```csv
//! description,quantity,rate
//! Logo design,1,250.00
//! Revisions,3,40
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// One line-item row exactly as it appears in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineItemRow {
    pub description: String,
    pub quantity: String,
    pub rate: String,
}

impl LineItemRow {
    pub fn into_cells(self) -> (String, String, String) {
        (self.description, self.quantity, self.rate)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure or a missing column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse CSV text and return the rows in file order.
pub fn load_from_str(input: &str) -> Result<Vec<LineItemRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<LineItemRow>()
        .map(|result| result.map_err(CsvLoadError::from))
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<LineItemRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
