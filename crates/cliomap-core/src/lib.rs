//! Core library for case-document field extraction.
//!
//! This crate provides:
//! - Document intake (PDF text layer with OCR fallback, images via OCR)
//! - Clio field extraction from configurable labels, regex overlays, and
//!   fallback label/value scans
//! - Payroll/tax line parsing and per-document match reports
//! - Folder inventories and batch processing

pub mod batch;
pub mod error;
pub mod extract;
pub mod intake;
pub mod inventory;
pub mod models;
pub mod ner;
pub mod ocr;
pub mod pdf;
pub mod report;

pub use batch::{BatchItem, BatchOutcome, BatchReport, DocumentProcessor};
pub use error::{ClioError, Result};
pub use extract::{FieldExtractor, FieldHit, MatchStrategy};
pub use intake::{DocumentIntake, PageMode};
pub use models::{ClioConfig, ExtractionRecord, ExtractionResult, FieldConfig, MatchReport};
pub use ner::{EntityRecognizer, HeuristicRecognizer};
pub use ocr::TextRecognizer;
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use report::Reporter;
