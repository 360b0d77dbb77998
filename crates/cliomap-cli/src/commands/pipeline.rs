//! Pipeline command - run the selected steps over one folder.

use std::path::PathBuf;

use clap::Args;
use console::style;

use cliomap_core::ClioConfig;

use super::{extract, inventory, ocr_folder};

/// Folder (inside the target) that receives OCR text.
const OCR_CACHE_DIR: &str = "ocr_cache";
/// Folder (inside the target) that receives extraction records.
const OUTPUT_DIR: &str = "output";

/// Arguments for the pipeline command.
#[derive(Args)]
pub struct PipelineArgs {
    /// Target folder of documents
    folder: PathBuf,

    /// Show folder/file breakdown
    #[arg(long)]
    inventory: bool,

    /// Run OCR on PDFs without a text layer
    #[arg(long)]
    ocr: bool,

    /// Extract Clio fields
    #[arg(long)]
    extract: bool,

    /// Field label configuration (YAML)
    #[arg(short, long, default_value = "field_config.yml")]
    config: PathBuf,
}

pub fn run(args: PipelineArgs, settings: &ClioConfig) -> anyhow::Result<()> {
    if !(args.inventory || args.ocr || args.extract) {
        println!(
            "{} No steps specified. Use --inventory, --ocr, or --extract.",
            style("✗").red()
        );
        return Ok(());
    }

    println!(
        "{} Starting pipeline for: {}",
        style("ℹ").blue(),
        args.folder.display()
    );

    if args.inventory {
        println!();
        println!("{}", style("Inventory...").bold());
        inventory::report(&args.folder, false)?;
    }

    if args.ocr {
        println!();
        println!("{}", style("OCR preprocessing...").bold());
        let cache = args.folder.join(OCR_CACHE_DIR);
        for (name, status) in ocr_folder::process_folder(&args.folder, &cache, settings)? {
            match status {
                Ok(status) => println!("{}: {}", name, status),
                Err(error) => println!("{}: {} {}", name, style("✗").red(), error),
            }
        }
    }

    if args.extract {
        println!();
        println!("{}", style("Extracting fields...").bold());
        let output = args.folder.join(OUTPUT_DIR);
        extract::extract_folder(&args.folder, &output, &args.config, settings)?;
    }

    println!();
    println!("{} Pipeline complete.", style("✓").green());
    Ok(())
}
