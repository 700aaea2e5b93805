//! File system scanner for mask images.
//!
//! Walks a directory tree in file-name order and yields every file whose
//! extension mentions `png` in any case.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Settings;

/// Scan a directory tree for mask files.
///
/// Entries are visited depth-first with siblings sorted by file name, so the
/// result order is stable across runs and platforms.
pub fn scan_masks(root: &Path, settings: &Settings) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_mask_file(path))
        .filter(|path| {
            let relative = path.strip_prefix(root).unwrap_or(path);
            !settings.is_excluded(relative)
        })
        .collect()
}

/// List mask files directly inside a directory (no recursion), sorted by name.
pub fn list_masks(dir: &Path) -> Vec<PathBuf> {
    walk_masks(dir).0
}

/// Like [`list_masks`], but also returns the errors met while reading `dir`.
pub fn walk_masks(dir: &Path) -> (Vec<PathBuf>, Vec<walkdir::Error>) {
    let mut masks = Vec::new();
    let mut errors = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        match entry {
            Ok(e) if e.file_type().is_file() && is_mask_file(e.path()) => {
                masks.push(e.into_path())
            }
            Ok(_) => {}
            Err(e) => errors.push(e),
        }
    }

    (masks, errors)
}

/// Check whether a path looks like a mask image.
pub fn is_mask_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.to_ascii_lowercase().contains("png"))
}
