use std::path::{Path, PathBuf};

use async_trait::async_trait;
use invoice_core::document::InvoiceDocument;
use invoice_core::export::{DocumentExporter, ExportError, PageSlice, Raster};
use tracing::{debug, warn};

use crate::preview::render_text;

/// Separates pages in the written file.
pub const PAGE_BREAK: &str = "\x0c\n";

/// Writes the text rendering of an invoice, one page per A4 slice.
///
/// The raster is one pixel per character: its width is the longest line and
/// its height is the number of lines.
#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[async_trait]
impl DocumentExporter for TextExporter {
    type Content = Vec<String>;

    fn extension(&self) -> &'static str {
        "txt"
    }

    async fn rasterize(&self, document: &InvoiceDocument) -> Result<Raster<Vec<String>>, ExportError> {
        let lines: Vec<String> = render_text(document).lines().map(str::to_string).collect();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        let width = u32::try_from(width).map_err(|e| ExportError::Rasterize(e.to_string()))?;
        let height = u32::try_from(lines.len()).map_err(|e| ExportError::Rasterize(e.to_string()))?;
        debug!(width, height, "invoice rasterized to text");

        Ok(Raster {
            width,
            height,
            content: lines,
        })
    }

    async fn save(
        &self,
        filename: &str,
        raster: &Raster<Vec<String>>,
        pages: &[PageSlice],
    ) -> Result<PathBuf, ExportError> {
        let mut body = String::new();
        for page in pages {
            if page.index > 0 {
                body.push_str(PAGE_BREAK);
            }
            let rows = raster
                .content
                .get(page.top_px as usize..page.bottom_px as usize)
                .ok_or_else(|| {
                    ExportError::Save(format!(
                        "page {} covers rows {}..{} of {}",
                        page.index,
                        page.top_px,
                        page.bottom_px,
                        raster.content.len()
                    ))
                })?;
            for row in rows {
                body.push_str(row);
                body.push('\n');
            }
        }

        let path = self.out_dir.join(filename);
        let partial = self.out_dir.join(format!(".{filename}.partial"));

        if let Err(e) = write_then_rename(&partial, &path, &body).await {
            if tokio::fs::remove_file(&partial).await.is_ok() {
                warn!(path = %partial.display(), "removed partial export");
            }
            return Err(ExportError::Save(format!("{}: {e}", path.display())));
        }
        Ok(path)
    }
}

async fn write_then_rename(
    partial: &Path,
    path: &Path,
    body: &str,
) -> std::io::Result<()> {
    tokio::fs::write(partial, body).await?;
    tokio::fs::rename(partial, path).await
}
