//! Finding masks, settings and data files on disk.

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::{PaintError, Result};

pub use manifest::Settings;
pub use scanner::{is_mask_file, list_masks, scan_masks, walk_masks};

/// The name of the optional settings file inside the mask directory.
pub const SETTINGS_FILENAME: &str = "maskpaint.yaml";

/// Load settings from an explicit path, or from the mask directory if present.
pub fn load_settings(mask_dir: &Path, explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return Settings::load(path);
    }

    let default_path = mask_dir.join(SETTINGS_FILENAME);
    if default_path.is_file() {
        Settings::load(&default_path)
    } else {
        Ok(Settings::default())
    }
}

/// Find the first `.sav` data file directly inside the mask directory.
pub fn locate_data_file(mask_dir: &Path) -> Result<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(mask_dir)
        .map_err(|e| PaintError::Io {
            path: mask_dir.to_path_buf(),
            message: format!("Failed to read mask directory: {}", e),
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    entries
        .into_iter()
        .find(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.to_ascii_lowercase().contains("sav"))
        })
        .map(|p| std::path::absolute(&p).unwrap_or(p))
        .ok_or_else(|| PaintError::DataFileNotFound {
            dir: mask_dir.to_path_buf(),
        })
}
