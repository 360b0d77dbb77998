//! Document intake: turn a PDF or image into page texts.
//!
//! Every PDF page goes through [`select_mode`]: a page whose trimmed text is
//! longer than the configured minimum is used as-is, anything shorter is
//! OCR'd from its page image. A short page with no image, or with no engine
//! loaded, keeps its extracted text. Images always go to OCR.

mod searchable;

pub use searchable::{ensure_searchable, SearchableStatus};

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{ClioError, OcrError, PdfError, Result};
use crate::models::config::IntakeConfig;
use crate::ocr::TextRecognizer;
use crate::pdf::PdfDocument;

/// How a page's text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    Text,
    Ocr,
}

/// Pick the text path when the trimmed text has more than `min_chars` characters.
pub fn select_mode(text: &str, min_chars: usize) -> PageMode {
    if text.trim().chars().count() > min_chars {
        PageMode::Text
    } else {
        PageMode::Ocr
    }
}

/// Kinds of input file intake understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Image,
}

impl SourceKind {
    /// Classify a path by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Text of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed).
    pub number: u32,
    pub mode: PageMode,
    pub text: String,
}

/// A document after intake.
#[derive(Debug, Clone)]
pub struct IntakeDocument {
    pub path: PathBuf,
    pub pages: Vec<PageText>,
}

impl IntakeDocument {
    /// All page texts joined with a blank line.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Number of pages that went through OCR.
    pub fn ocr_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.mode == PageMode::Ocr).count()
    }
}

/// Reads documents, with an optional OCR engine for pages without text.
pub struct DocumentIntake {
    config: IntakeConfig,
    recognizer: Option<Box<dyn TextRecognizer>>,
}

impl DocumentIntake {
    /// Intake without OCR; pages that need it fail with [`OcrError::Unavailable`].
    pub fn new(config: IntakeConfig) -> Self {
        Self {
            config,
            recognizer: None,
        }
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Read a file, dispatching on its extension.
    pub fn read(&self, path: &Path) -> Result<IntakeDocument> {
        let kind = SourceKind::from_path(path)
            .ok_or_else(|| ClioError::UnsupportedFormat(path.to_path_buf()))?;

        let pages = match kind {
            SourceKind::Pdf => self.read_pdf(&PdfDocument::open(path)?)?,
            SourceKind::Image => {
                let image = image::open(path)?;
                vec![PageText {
                    number: 1,
                    mode: PageMode::Ocr,
                    text: self.ocr(&image)?,
                }]
            }
        };

        let document = IntakeDocument {
            path: path.to_path_buf(),
            pages,
        };
        info!(
            "Read {} ({} pages, {} via OCR)",
            path.display(),
            document.pages.len(),
            document.ocr_pages()
        );
        Ok(document)
    }

    /// Page texts of a loaded PDF, OCR'ing pages without enough text.
    pub fn read_pdf(&self, pdf: &PdfDocument) -> Result<Vec<PageText>> {
        let texts = pdf.page_texts()?;
        let mut pages = Vec::with_capacity(texts.len());

        for (number, text) in (1u32..).zip(texts) {
            let mode = select_mode(&text, self.config.min_text_chars);
            debug!("Page {}: {:?}", number, mode);

            let page = match mode {
                PageMode::Text => PageText { number, mode, text },
                PageMode::Ocr => match self.ocr_page(pdf, number) {
                    Ok(ocr_text) => PageText {
                        number,
                        mode,
                        text: ocr_text,
                    },
                    Err(e @ ClioError::Pdf(PdfError::ImageExtraction(_)))
                    | Err(e @ ClioError::Ocr(OcrError::Unavailable)) => {
                        warn!("Page {}: {}, falling back to extracted text", number, e);
                        PageText {
                            number,
                            mode: PageMode::Text,
                            text,
                        }
                    }
                    Err(e) => return Err(e),
                },
            };

            pages.push(page);
        }

        Ok(pages)
    }

    fn ocr_page(&self, pdf: &PdfDocument, number: u32) -> Result<String> {
        let image = pdf.page_image(number, self.config.render_dpi)?;
        self.ocr(&image)
    }

    fn ocr(&self, image: &DynamicImage) -> Result<String> {
        let recognizer = self.recognizer.as_ref().ok_or(OcrError::Unavailable)?;
        Ok(recognizer.recognize(image)?)
    }
}
