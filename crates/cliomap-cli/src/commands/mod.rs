//! Subcommands and the setup they share.

pub mod extract;
pub mod inventory;
pub mod ocr_folder;
pub mod pipeline;

use std::path::Path;

use image::DynamicImage;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use cliomap_core::error::OcrError;
use cliomap_core::models::config::OcrConfig;
use cliomap_core::{
    ClioConfig, DocumentIntake, DocumentProcessor, FieldConfig, FieldExtractor, PureOcrEngine,
    TextRecognizer,
};

/// Load settings from `path`, or use defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClioConfig> {
    match path {
        Some(path) => Ok(ClioConfig::from_file(path)?),
        None => Ok(ClioConfig::default()),
    }
}

/// Stand-in used when no OCR models are installed; every page it sees fails.
struct NoEngine;

impl TextRecognizer for NoEngine {
    fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        Err(OcrError::Unavailable)
    }
}

/// Load the OCR engine if its models are on disk.
pub fn load_recognizer(config: &OcrConfig) -> Option<Box<dyn TextRecognizer>> {
    if !config.models_present() {
        debug!("No OCR models in {}", config.model_dir.display());
        return None;
    }

    match PureOcrEngine::from_config(config) {
        Ok(engine) => Some(Box::new(engine)),
        Err(e) => {
            warn!("OCR engine unavailable: {}", e);
            None
        }
    }
}

/// The OCR engine, or a recognizer that reports it missing.
pub fn recognizer_or_missing(config: &OcrConfig) -> Box<dyn TextRecognizer> {
    load_recognizer(config).unwrap_or_else(|| Box::new(NoEngine))
}

/// Build the intake/extraction processor from settings and a field config path.
pub fn build_processor(settings: &ClioConfig, field_config: &Path) -> anyhow::Result<DocumentProcessor> {
    let fields = FieldConfig::load_or_default(field_config)?;

    let mut intake = DocumentIntake::new(settings.intake.clone());
    if let Some(recognizer) = load_recognizer(&settings.ocr) {
        intake = intake.with_recognizer(recognizer);
    }

    Ok(DocumentProcessor::new(intake, FieldExtractor::new(fields))
        .with_pretty(settings.output.pretty))
}

pub fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
