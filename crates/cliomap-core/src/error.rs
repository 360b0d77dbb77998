//! Error types for the cliomap-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the cliomap library.
#[derive(Error, Debug)]
pub enum ClioError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Field or settings configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file type is not one we can read.
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to extract images from PDF.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// No OCR engine was configured for a page that needs one.
    #[error("no OCR engine available")]
    Unavailable,
}

/// Errors related to loading configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML/JSON for the expected shape.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// The field configuration has no keys.
    #[error("field configuration is empty")]
    Empty,
}

/// Errors from scanning a folder or writing its summary.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("path is not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to walk folder: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for the cliomap library.
pub type Result<T> = std::result::Result<T, ClioError>;
