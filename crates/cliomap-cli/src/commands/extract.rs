//! Extract command - pull Clio fields from one file or a folder of files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use cliomap_core::batch::collect_inputs;
use cliomap_core::{BatchReport, ClioConfig, ExtractionRecord};

use super::{build_processor, progress_bar};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Path to a single PDF or image file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Path to a folder of PDFs/images to batch process
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Directory to save extracted .json files (default: settings output_dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field label configuration (YAML)
    #[arg(short, long, default_value = "field_config.yml")]
    config: PathBuf,

    /// Also write a summary.csv of batch results into the output directory
    #[arg(long)]
    summary: bool,
}

pub fn run(args: ExtractArgs, settings: &ClioConfig) -> anyhow::Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| settings.output.output_dir.clone());

    if args.file.is_some() || args.folder.is_some() {
        fs::create_dir_all(&output)?;
    }

    if let Some(folder) = &args.folder {
        let report = extract_folder(folder, &output, &args.config, settings)?;
        if args.summary {
            let summary_path = output.join("summary.csv");
            report.write_summary_csv(&summary_path)?;
            println!(
                "{} Summary written to {}",
                style("✓").green(),
                summary_path.display()
            );
        }
        Ok(())
    } else if let Some(file) = &args.file {
        extract_file(file, &output, &args.config, settings)
    } else {
        println!(
            "{} Please provide either --file or --folder.",
            style("⚠").yellow()
        );
        Ok(())
    }
}

/// Extract one file and print what was found.
pub fn extract_file(
    file: &Path,
    output: &Path,
    field_config: &Path,
    settings: &ClioConfig,
) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("Input file not found: {}", file.display());
    }

    let start = Instant::now();
    let processor = build_processor(settings, field_config)?;
    let (output_path, record) = processor.process_to_dir(file, output)?;

    print_record(&record);
    println!(
        "{} Output saved to: {}",
        style("✓").green(),
        output_path.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Extract every supported file directly inside `folder`.
pub fn extract_folder(
    folder: &Path,
    output: &Path,
    field_config: &Path,
    settings: &ClioConfig,
) -> anyhow::Result<BatchReport> {
    if !folder.is_dir() {
        anyhow::bail!("Folder not found: {}", folder.display());
    }

    let start = Instant::now();
    let files = collect_inputs(folder)?;
    if files.is_empty() {
        println!(
            "{} No PDF or image files found in {}",
            style("ℹ").blue(),
            folder.display()
        );
        return Ok(BatchReport::default());
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let processor = build_processor(settings, field_config)?;
    let pb = progress_bar(files.len() as u64);
    let report = processor.process_batch(&files, output, |_| pb.inc(1));
    pb.finish_with_message("Complete");

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.items.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(report.succeeded()).green(),
        style(report.failed()).red()
    );

    if report.failed() > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, error) in report.failures() {
            println!("  - {}: {}", path.display(), error);
        }
    }

    Ok(report)
}

fn print_record(record: &ExtractionRecord) {
    println!("{}", style("Extracted Fields for Clio:").bold());
    if record.clio_fields.is_empty() {
        println!(
            "{} No Clio-compatible fields were found.",
            style("⚠").yellow()
        );
    }
    for (key, value) in &record.clio_fields {
        println!("{} {} → {}", style("✓").green(), key, value);
    }

    if !record.unmapped_fields.is_empty() {
        println!();
        println!("{}", style("Other Fields Detected (Unmapped):").bold());
        for (label, value) in &record.unmapped_fields {
            println!("  - {}: {}", label, value);
        }
    }

    if !record.financial_data.is_empty() {
        println!();
        println!("{}", style("Financial Lines:").bold());
        for (category, amounts) in &record.financial_data {
            println!(
                "  - {}: {} (YTD {})",
                category, amounts.this_period, amounts.year_to_date
            );
        }
    }

    let report = &record.field_report;
    println!();
    println!(
        "{} Matched {}/{} configured fields",
        style("ℹ").blue(),
        report.matched,
        report.total_expected
    );
    if !report.missing_fields.is_empty() {
        println!("   Missing: {}", report.missing_fields.join(", "));
    }
}
