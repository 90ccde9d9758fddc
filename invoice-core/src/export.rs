//! Export of a rendered invoice to a paginated file.
//!
//! The pipeline is: rasterize the document, slice the raster into pages of a
//! fixed physical size, then save. Rasterizing and saving are delegated to a
//! [`DocumentExporter`]; this module owns filenames and page geometry.

use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;
use tracing::{error, info};

use crate::Notification;
use crate::document::InvoiceDocument;

pub const EXPORT_SUCCESS_MESSAGE: &str = "Export generated successfully!";
pub const EXPORT_FAILURE_MESSAGE: &str = "Error generating export. Please try again.";

/// Slack for floating-point noise when deciding whether another page is needed.
const PAGE_EPSILON_MM: f64 = 1e-6;

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("rasterized document is empty ({width}x{height})")]
    EmptyRaster { width: u32, height: u32 },

    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("could not save export: {0}")]
    Save(String),
}

/// Physical page size the raster is laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageLayout {
    /// Portrait A4 as used for invoices: 210 mm wide, 295 mm per page.
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 295.0,
    };
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::A4
    }
}

/// One page of the export.
///
/// `offset_mm` is where the top of the full image sits relative to the top
/// of this page (zero or negative). `top_px..bottom_px` is the band of raster
/// rows visible on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlice {
    pub index: usize,
    pub offset_mm: f64,
    pub top_px: u32,
    pub bottom_px: u32,
}

/// A rasterized document. `content` is whatever the exporter draws into.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    pub width: u32,
    pub height: u32,
    pub content: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub pages: usize,
}

/// Rasterizes an [`InvoiceDocument`] and writes the paginated result.
///
/// `save` must either write the complete artifact or leave nothing behind.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    type Content: Send + Sync;

    /// File extension without the dot, e.g. `"txt"`.
    fn extension(&self) -> &'static str;

    async fn rasterize(&self, document: &InvoiceDocument) -> Result<Raster<Self::Content>, ExportError>;

    async fn save(
        &self,
        filename: &str,
        raster: &Raster<Self::Content>,
        pages: &[PageSlice],
    ) -> Result<PathBuf, ExportError>;
}

/// `<invoice number>_<client name>`, with each whitespace run in the client
/// name replaced by one underscore.
///
/// Path separators and other characters that are not valid in file names
/// are replaced by an underscore in both parts, so the stem never leaves the
/// output directory.
///
/// ```
/// use invoice_core::export::export_file_stem;
///
/// assert_eq!(export_file_stem("INV-7", "Jane  Q Public"), "INV-7_Jane_Q_Public");
/// assert_eq!(export_file_stem("INV-7", "Smith/Jones"), "INV-7_Smith_Jones");
/// ```
pub fn export_file_stem(
    invoice_number: &str,
    client_name: &str,
) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"));
    let unsafe_chars =
        UNSAFE.get_or_init(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1F]"#).expect("static pattern"));

    let client = whitespace.replace_all(client_name, "_");
    format!(
        "{}_{}",
        unsafe_chars.replace_all(invoice_number, "_"),
        unsafe_chars.replace_all(&client, "_")
    )
}

/// Slices a `width × height` raster into pages of `layout`.
///
/// The raster is scaled to the page width; pages are added until its scaled
/// height is used up. There is always at least one page.
pub fn paginate(
    layout: PageLayout,
    width: u32,
    height: u32,
) -> Result<Vec<PageSlice>, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyRaster { width, height });
    }

    let image_height_mm = f64::from(height) * layout.width_mm / f64::from(width);
    let page_px = layout.height_mm * f64::from(width) / layout.width_mm;
    let row_at = |page: usize| -> u32 {
        let row = (page as f64 * page_px).round();
        if row >= f64::from(height) { height } else { row as u32 }
    };

    let mut slices = Vec::new();
    let mut remaining_mm = image_height_mm;
    loop {
        let index = slices.len();
        slices.push(PageSlice {
            index,
            offset_mm: -(index as f64) * layout.height_mm,
            top_px: row_at(index),
            bottom_px: row_at(index + 1),
        });
        remaining_mm -= layout.height_mm;
        if remaining_mm <= PAGE_EPSILON_MM {
            break;
        }
    }
    Ok(slices)
}

/// Runs the full pipeline for `document` and returns where it was written.
pub async fn export_document<E: DocumentExporter>(
    exporter: &E,
    document: &InvoiceDocument,
    file_stem: &str,
    layout: PageLayout,
) -> Result<ExportSummary, ExportError> {
    let raster = exporter.rasterize(document).await?;
    let pages = paginate(layout, raster.width, raster.height)?;
    let filename = format!("{file_stem}.{}", exporter.extension());
    let path = exporter.save(&filename, &raster, &pages).await?;

    info!(path = %path.display(), pages = pages.len(), "invoice exported");
    Ok(ExportSummary {
        path,
        pages: pages.len(),
    })
}

/// The message to show once an export attempt has finished.
pub fn export_notification(result: &Result<ExportSummary, ExportError>) -> Notification {
    match result {
        Ok(_) => Notification::success(EXPORT_SUCCESS_MESSAGE),
        Err(e) => {
            error!(error = %e, "error generating export");
            Notification::error(EXPORT_FAILURE_MESSAGE)
        }
    }
}
