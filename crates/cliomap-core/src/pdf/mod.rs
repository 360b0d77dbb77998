//! PDF reading: per-page text and page images for OCR.

mod reader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use reader::PdfDocument;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, crate::error::PdfError>;
