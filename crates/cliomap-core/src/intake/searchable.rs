//! Make scanned PDFs searchable by writing their OCR text next to them.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::IntakeConfig;
use crate::ocr::TextRecognizer;
use crate::pdf::PdfDocument;

/// Outcome of [`ensure_searchable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchableStatus {
    /// At least one page already has text.
    Skipped,
    /// Every page was OCR'd and the text written to `output`.
    OcrApplied { output: PathBuf },
}

impl std::fmt::Display for SearchableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped => write!(f, "Skipped (already searchable)"),
            Self::OcrApplied { .. } => write!(f, "OCR applied"),
        }
    }
}

/// OCR a PDF with no text layer into `<out_dir>/<basename>.txt`.
///
/// Pages are joined with a blank line. `out_dir` is created if needed.
pub fn ensure_searchable(
    pdf_path: &Path,
    out_dir: &Path,
    recognizer: &dyn TextRecognizer,
    config: &IntakeConfig,
) -> Result<SearchableStatus> {
    let pdf = PdfDocument::open(pdf_path)?;

    if pdf.page_texts()?.iter().any(|t| !t.trim().is_empty()) {
        debug!("{} already has text", pdf_path.display());
        return Ok(SearchableStatus::Skipped);
    }

    let mut pages = Vec::with_capacity(pdf.page_count() as usize);
    for number in 1..=pdf.page_count() {
        let image = pdf.page_image(number, config.render_dpi)?;
        pages.push(recognizer.recognize(&image)?);
    }

    std::fs::create_dir_all(out_dir)?;
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let output = out_dir.join(format!("{stem}.txt"));
    std::fs::write(&output, pages.join("\n\n"))?;

    info!("Wrote OCR text for {} pages to {}", pages.len(), output.display());
    Ok(SearchableStatus::OcrApplied { output })
}
