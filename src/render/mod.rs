//! Rendering module for maskpaint.
//!
//! Stencil compositing primitives, the scratch directory, and one module
//! per pipeline pass: tint, merge, mask options, gloss, material export.

mod gloss;
mod material;
mod merge;
mod options;
mod png;
mod scratch;
mod stencil;
mod tint;

pub use gloss::{apply_gloss, find_gloss_part};
pub use material::{category_path, export_categories, save_categories, CategoryMasks};
pub use merge::merge_layers;
pub use options::{apply_mask_options, find_mask_option, variant_file_names};
pub use png::{read_png, write_png};
pub use scratch::ScratchDir;
pub use stencil::{black_canvas, blend_channel, paste_colour, stencil_paste, tint_mask};
pub use tint::{part_colour, tint_parts};
