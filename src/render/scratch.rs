//! The scratch working directory for tinted layers.
//!
//! A `ScratchDir` is owned by one run. Temporary scratch directories are
//! removed when dropped; persistent ones keep their directory but lose
//! their layers unless `keep` is set.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::discovery::{list_masks, walk_masks};
use crate::error::{PaintError, Result};
use crate::report::{codes, Report};

/// Prefix for temporary scratch directories.
const TEMP_PREFIX: &str = "maskpaint-";

#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    // `None` for persistent directories.
    temp: Option<TempDir>,
    keep: bool,
}

impl ScratchDir {
    /// Create a fresh temporary directory.
    pub fn temporary() -> Result<Self> {
        Self::temporary_with(false)
    }

    /// Create a fresh temporary directory, optionally left on disk afterwards.
    pub fn temporary_with(keep: bool) -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir()
            .map_err(|e| PaintError::Io {
                path: std::env::temp_dir(),
                message: format!("Failed to create scratch directory: {}", e),
            })?;

        if keep {
            let path = temp.keep();
            return Ok(Self {
                path,
                temp: None,
                keep: true,
            });
        }

        Ok(Self {
            path: temp.path().to_path_buf(),
            temp: Some(temp),
            keep: false,
        })
    }

    /// Use a named directory, creating it if needed.
    pub fn persistent(path: impl Into<PathBuf>, keep: bool) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|e| PaintError::Io {
            path: path.clone(),
            message: format!("Failed to create scratch directory: {}", e),
        })?;

        Ok(Self {
            path,
            temp: None,
            keep,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path a layer with the given file name is written to.
    pub fn layer_path(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Layer files currently in the directory, sorted by file name.
    pub fn layers(&self) -> Vec<PathBuf> {
        list_masks(&self.path)
    }

    /// Remove every PNG from the directory.
    ///
    /// Failures to read the directory or remove a file are reported as
    /// warnings and never abort the run. Returns the number of files removed.
    pub fn clear(&self, report: &mut Report) -> usize {
        let (layers, errors) = walk_masks(&self.path);
        for e in errors {
            report.warning(
                codes::SCRATCH_CLEAR,
                format!("Could not read scratch directory {}: {}", self.path.display(), e),
            );
        }

        let mut removed = 0;
        for layer in layers {
            match fs::remove_file(&layer) {
                Ok(()) => removed += 1,
                Err(e) => report.warning(
                    codes::SCRATCH_CLEAR,
                    format!("Could not remove stale layer {}: {}", layer.display(), e),
                ),
            }
        }
        removed
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.keep || self.temp.is_some() {
            return;
        }
        for layer in self.layers() {
            let _ = fs::remove_file(layer);
        }
    }
}
