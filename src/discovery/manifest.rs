//! Optional run settings (maskpaint.yaml).
//!
//! Settings live next to the masks and hold defaults that would otherwise
//! be repeated on every command line. Command-line flags win over them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PaintError, Result};

/// Run settings loaded from maskpaint.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Persistent scratch directory. A fresh temporary one is used if unset.
    pub scratch: Option<PathBuf>,

    /// Keep the scratch directory after the run.
    pub keep_scratch: bool,

    /// Directory for the merged texture and category masks.
    /// Defaults to the colour document's directory.
    pub output_dir: Option<PathBuf>,

    /// Patterns to exclude from mask discovery.
    pub excludes: Vec<String>,
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PaintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PaintError::Config {
            message: format!("Invalid settings: {}", e),
            help: Some("Check maskpaint.yaml syntax".to_string()),
        })
    }

    /// Check if a path (relative to the mask root) is excluded.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");

        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.starts_with(&format!("{}/", dir))
                    || path.contains(&format!("/{}/", dir));
            }
            return path.contains(suffix);
        }

        if pattern.starts_with('*') && !pattern.contains('/') {
            return path.ends_with(&pattern[1..]);
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }
}
