//! maskpaint - colour texture compositing from greyscale part masks
//!
//! A library for tinting per-part greyscale masks from a colour document,
//! merging them into one texture, and deriving material category masks.

pub mod assembler;
pub mod catalog;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod render;
pub mod report;
pub mod types;

pub use assembler::{merged_path, Assembler, Assembly};
pub use catalog::{decode_mask, MaskCatalog, MaskEntry};
pub use discovery::{load_settings, locate_data_file, scan_masks, Settings};
pub use error::{PaintError, Result};
pub use render::{CategoryMasks, ScratchDir};
pub use report::{Notice, Report, Severity};
pub use types::{
    resolve_part_name, ActiveTabs, Colour, ColourDocument, MaterialCategory, PartColor, PartKind,
};
