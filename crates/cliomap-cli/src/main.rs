//! CLI application for extracting Clio fields from case documents.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{extract, inventory, ocr_folder, pipeline};

/// cliomap - Extract Clio-ready fields from scanned PDFs and images
#[derive(Parser)]
#[command(name = "cliomap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a JSON settings file
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a file or a folder of files
    Extract(extract::ExtractArgs),

    /// Count folders, files, and file types in a directory
    Inventory(inventory::InventoryArgs),

    /// OCR every PDF in a folder that has no text layer
    OcrFolder(ocr_folder::OcrFolderArgs),

    /// Run inventory, OCR, and extraction steps over a folder
    Pipeline(pipeline::PipelineArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let settings = commands::load_settings(cli.settings.as_deref())?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, &settings),
        Commands::Inventory(args) => inventory::run(args),
        Commands::OcrFolder(args) => ocr_folder::run(args, &settings),
        Commands::Pipeline(args) => pipeline::run(args, &settings),
    }
}
