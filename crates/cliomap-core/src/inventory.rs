//! Folder inventory: file counts and sizes per extension.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::InventoryError;

/// Name of the CSV written by [`FolderInventory::write_csv`].
pub const SUMMARY_CSV: &str = "folder_summary.csv";

/// Bucket for files without an extension.
pub const NO_EXTENSION: &str = "no_ext";

/// Count and total byte size of files sharing an extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionStats {
    pub count: u64,
    pub size: u64,
}

/// Summary of a folder tree.
#[derive(Debug, Clone, Serialize)]
pub struct FolderInventory {
    pub root: PathBuf,
    /// Sub-folders below the root, at any depth.
    pub folders: u64,
    pub files: u64,
    /// Keyed by lowercase extension with its dot (`.pdf`), or [`NO_EXTENSION`].
    pub by_extension: BTreeMap<String, ExtensionStats>,
}

/// Walk `path` recursively and tally folders, files and extensions.
pub fn scan_folder(path: &Path) -> Result<FolderInventory, InventoryError> {
    if !path.exists() {
        return Err(InventoryError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(InventoryError::NotADirectory(path.to_path_buf()));
    }

    let mut inventory = FolderInventory {
        root: path.to_path_buf(),
        folders: 0,
        files: 0,
        by_extension: BTreeMap::new(),
    };

    for entry in WalkDir::new(path).min_depth(1) {
        let entry = entry?;

        if entry.file_type().is_dir() {
            inventory.folders += 1;
            continue;
        }

        inventory.files += 1;
        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                warn!("Could not stat {}: {}", entry.path().display(), e);
                0
            }
        };

        let stats = inventory
            .by_extension
            .entry(extension_key(entry.path()))
            .or_default();
        stats.count += 1;
        stats.size += size;
    }

    debug!(
        "Scanned {}: {} folders, {} files, {} extensions",
        path.display(),
        inventory.folders,
        inventory.files,
        inventory.by_extension.len()
    );
    Ok(inventory)
}

fn extension_key(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => NO_EXTENSION.to_string(),
    }
}

impl FolderInventory {
    pub fn total_size(&self) -> u64 {
        self.by_extension.values().map(|s| s.size).sum()
    }

    /// Write the per-extension summary to `<root>/folder_summary.csv`.
    pub fn write_csv(&self) -> Result<PathBuf, InventoryError> {
        let csv_path = self.root.join(SUMMARY_CSV);
        let mut wtr = csv::Writer::from_path(&csv_path)?;

        wtr.write_record(["Extension", "Count", "Total Size (bytes)"])?;
        for (ext, stats) in &self.by_extension {
            wtr.write_record([ext.as_str(), &stats.count.to_string(), &stats.size.to_string()])?;
        }

        wtr.flush().map_err(csv::Error::from)?;
        Ok(csv_path)
    }
}

/// Format a byte count as `"{:.1} {unit}B"`, stepping by 1024.
pub fn human_size(bytes: u64) -> String {
    let mut num = bytes as f64;
    for unit in ["", "K", "M", "G", "T"] {
        if num.abs() < 1024.0 {
            return format!("{num:3.1} {unit}B");
        }
        num /= 1024.0;
    }
    format!("{num:.1} PB")
}
