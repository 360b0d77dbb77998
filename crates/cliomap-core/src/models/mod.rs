//! Data models: settings, field configuration, and extraction records.

pub mod config;
pub mod fields;
pub mod record;

pub use config::{ClioConfig, IntakeConfig, OcrConfig, OutputConfig};
pub use fields::FieldConfig;
pub use record::{ExtractionRecord, ExtractionResult, FinancialAmounts, MatchReport};
