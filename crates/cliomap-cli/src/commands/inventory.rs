//! Inventory command - folder, file, and extension counts.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use cliomap_core::error::InventoryError;
use cliomap_core::inventory::{human_size, scan_folder, FolderInventory};

/// Arguments for the inventory command.
#[derive(Args)]
pub struct InventoryArgs {
    /// Path to the folder to scan
    path: PathBuf,

    /// Export the summary as folder_summary.csv inside the folder
    #[arg(long)]
    csv: bool,
}

pub fn run(args: InventoryArgs) -> anyhow::Result<()> {
    report(&args.path, args.csv)
}

/// Scan and print a folder summary. A missing path or a plain file is
/// reported, not treated as a failure.
pub fn report(path: &Path, export_csv: bool) -> anyhow::Result<()> {
    let inventory = match scan_folder(path) {
        Ok(inventory) => inventory,
        Err(e @ (InventoryError::NotFound(_) | InventoryError::NotADirectory(_))) => {
            println!("{} Error: {}", style("✗").red(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print_table(&inventory);

    if export_csv {
        let csv_path = inventory.write_csv()?;
        println!();
        println!(
            "{} Summary exported to: {}",
            style("✓").green(),
            csv_path.display()
        );
    }

    Ok(())
}

fn print_table(inventory: &FolderInventory) {
    let ext_width = inventory
        .by_extension
        .keys()
        .map(|k| k.len())
        .chain(["Extension".len()])
        .max()
        .unwrap_or(9);

    println!();
    println!("{}", style("File Types Summary:").bold());
    println!(
        "  {:<ext_width$}  {:>7}  {:>12}",
        "Extension", "Count", "Total Size"
    );
    for (ext, stats) in &inventory.by_extension {
        println!(
            "  {:<ext_width$}  {:>7}  {:>12}",
            ext,
            stats.count,
            human_size(stats.size)
        );
    }

    println!();
    println!("{} Total folders: {}", style("ℹ").blue(), inventory.folders);
    println!("{} Total files: {}", style("ℹ").blue(), inventory.files);
}
