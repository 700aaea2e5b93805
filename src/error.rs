use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for maskpaint operations
#[derive(Error, Diagnostic, Debug)]
pub enum PaintError {
    #[error("IO error: {0}")]
    #[diagnostic(code(maskpaint::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(maskpaint::io))]
    Io { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(maskpaint::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("No .sav data file found in {}", dir.display())]
    #[diagnostic(
        code(maskpaint::config),
        help("Pass the colour document path explicitly")
    )]
    DataFileNotFound { dir: PathBuf },

    #[error("No mask cataloged for part '{part}'")]
    #[diagnostic(
        code(maskpaint::catalog),
        help("The scratch directory and the mask catalog are out of sync")
    )]
    MissingMask { part: String },

    #[error("No masks found in {}", dir.display())]
    #[diagnostic(
        code(maskpaint::catalog),
        help("The mask directory must contain at least one .png file")
    )]
    EmptyCatalog { dir: PathBuf },

    #[error("Image error with {path}: {message}")]
    #[diagnostic(code(maskpaint::image))]
    Image { path: PathBuf, message: String },

    #[error("Composite error: {message}")]
    #[diagnostic(
        code(maskpaint::composite),
        help("All masks must share the same pixel dimensions")
    )]
    Composite { message: String },
}

impl PaintError {
    /// Build a configuration error without help text.
    pub fn config(message: impl Into<String>) -> Self {
        PaintError::Config {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PaintError>;
