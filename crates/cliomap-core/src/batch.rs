//! Per-document processing and folder batches.
//!
//! A batch never stops on a bad file: each input gets a [`BatchItem`] with
//! either the written record or the error that stopped it.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::extract::FieldExtractor;
use crate::intake::{DocumentIntake, SourceKind};
use crate::models::record::ExtractionRecord;

/// Suffix appended to the input stem for record files.
pub const RECORD_SUFFIX: &str = "_extracted.json";

/// Where the record for `input` goes inside `out_dir`.
pub fn record_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    out_dir.join(format!("{stem}{RECORD_SUFFIX}"))
}

/// Supported files directly inside `folder`, sorted by name.
pub fn collect_inputs(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && SourceKind::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// How one batch item ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Extracted { output: PathBuf, matched: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub path: PathBuf,
    pub outcome: BatchOutcome,
    pub elapsed_ms: u64,
}

impl BatchItem {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Extracted { .. })
    }
}

/// Outcomes for every file in a batch, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            BatchOutcome::Failed { error } => Some((item.path.as_path(), error.as_str())),
            BatchOutcome::Extracted { .. } => None,
        })
    }

    /// Write one CSV row per item: file, status, matched count, elapsed, error.
    pub fn write_summary_csv(&self, path: &Path) -> std::result::Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["filename", "status", "matched", "elapsed_ms", "error"])?;

        for item in &self.items {
            let filename = item
                .path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let elapsed = item.elapsed_ms.to_string();

            match &item.outcome {
                BatchOutcome::Extracted { matched, .. } => {
                    let matched = matched.to_string();
                    wtr.write_record([filename.as_str(), "success", &matched, &elapsed, ""])?;
                }
                BatchOutcome::Failed { error } => {
                    wtr.write_record([filename.as_str(), "error", "", &elapsed, error])?;
                }
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Intake plus extraction for whole files.
pub struct DocumentProcessor {
    intake: DocumentIntake,
    extractor: FieldExtractor,
    pretty: bool,
}

impl DocumentProcessor {
    pub fn new(intake: DocumentIntake, extractor: FieldExtractor) -> Self {
        Self {
            intake,
            extractor,
            pretty: true,
        }
    }

    /// Pretty-print written records (default on).
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Read a file and extract its record.
    pub fn process(&self, path: &Path) -> Result<ExtractionRecord> {
        let document = self.intake.read(path)?;
        let (result, report) = self.extractor.extract_with_report(&document.text());
        Ok(ExtractionRecord::new(result, report))
    }

    /// Process a file and write `<stem>_extracted.json` into `out_dir`.
    pub fn process_to_dir(&self, path: &Path, out_dir: &Path) -> Result<(PathBuf, ExtractionRecord)> {
        let record = self.process(path)?;

        std::fs::create_dir_all(out_dir)?;
        let output = record_path(path, out_dir);
        let json = if self.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };
        std::fs::write(&output, json)?;

        debug!("Wrote {}", output.display());
        Ok((output, record))
    }

    /// Process every file, calling `on_item` after each one.
    pub fn process_batch(
        &self,
        files: &[PathBuf],
        out_dir: &Path,
        mut on_item: impl FnMut(&BatchItem),
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for path in files {
            let start = Instant::now();
            let outcome = match self.process_to_dir(path, out_dir) {
                Ok((output, record)) => BatchOutcome::Extracted {
                    output,
                    matched: record.field_report.matched,
                },
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    BatchOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            let item = BatchItem {
                path: path.clone(),
                outcome,
                elapsed_ms: start.elapsed().as_millis() as u64,
            };
            on_item(&item);
            report.items.push(item);
        }

        info!(
            "Batch finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }
}
