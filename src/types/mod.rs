//! Core domain types for maskpaint.
//!
//! - `Colour` - opaque RGB byte colour
//! - `PartKind` - closed classification of part identifiers
//! - `ColourDocument` - per-part colours and active-tab selectors

mod colour;
mod document;
mod part;

pub use colour::Colour;
pub use document::{ActiveTabs, ColourDocument, MaterialCategory, PartColor, MIN_ACTIVE_TABS};
pub use part::{
    is_gloss, is_pattern_slot, is_shade_layer, is_tattoo, resolve_part_name, strip_numeric_prefix,
    PartKind, GLOSS_KEYWORD, PATTERN_KEYWORD, SHADE_SUFFIXES, TATTOO_KEYWORD,
};
