//! OCR-folder command - write OCR text for PDFs without a text layer.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use glob::{glob_with, MatchOptions, Pattern};
use tracing::warn;

use cliomap_core::intake::{ensure_searchable, SearchableStatus};
use cliomap_core::ClioConfig;

use super::{progress_bar, recognizer_or_missing};

/// Arguments for the ocr-folder command.
#[derive(Args)]
pub struct OcrFolderArgs {
    /// Folder with PDF files
    input: PathBuf,

    /// Folder to write OCR'd .txt files
    output: PathBuf,
}

pub fn run(args: OcrFolderArgs, settings: &ClioConfig) -> anyhow::Result<()> {
    for (name, status) in process_folder(&args.input, &args.output, settings)? {
        match status {
            Ok(status @ SearchableStatus::Skipped) => {
                println!("{}: {} {}", name, style("●").green(), status)
            }
            Ok(status) => println!("{}: {} {}", name, style("●").blue(), status),
            Err(error) => println!("{}: {} {}", name, style("✗").red(), error),
        }
    }
    Ok(())
}

/// `(file name, status or error)` for every PDF directly inside `input`.
pub fn process_folder(
    input: &Path,
    output: &Path,
    settings: &ClioConfig,
) -> anyhow::Result<Vec<(String, Result<SearchableStatus, String>)>> {
    if !input.is_dir() {
        anyhow::bail!("Folder not found: {}", input.display());
    }
    fs::create_dir_all(output)?;

    let options = MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };
    let pattern = format!("{}/*.pdf", Pattern::escape(&input.to_string_lossy()));
    let mut pdfs: Vec<PathBuf> = glob_with(&pattern, options)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    pdfs.sort();

    let recognizer = recognizer_or_missing(&settings.ocr);
    let pb = progress_bar(pdfs.len() as u64);
    let mut log = Vec::with_capacity(pdfs.len());

    for pdf in &pdfs {
        let name = pdf
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let status = ensure_searchable(pdf, output, recognizer.as_ref(), &settings.intake)
            .map_err(|e| {
                warn!("OCR failed for {}: {}", pdf.display(), e);
                e.to_string()
            });

        log.push((name, status));
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(log)
}
