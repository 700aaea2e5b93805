//! Part identifiers and their classification.
//!
//! Every mask file name reduces to a part identifier, and every identifier
//! falls into exactly one [`PartKind`]. The naming conventions are:
//!
//! - `Pat` optionally followed by digits at the end: a pattern slot
//! - a digit run followed by `tat` (any case) at the end: a tattoo
//! - `gloss` (any case) anywhere: the gloss layer
//! - anything else: a regular tintable part

use std::fmt;
use std::path::Path;

/// Keyword marking a pattern slot.
pub const PATTERN_KEYWORD: &str = "Pat";

/// Keyword marking a tattoo part.
pub const TATTOO_KEYWORD: &str = "tat";

/// Keyword marking the gloss layer.
pub const GLOSS_KEYWORD: &str = "gloss";

/// Identifier suffixes that are never exported as material categories.
pub const SHADE_SUFFIXES: [&str; 2] = ["Layer1", "Layer2"];

/// Closed classification of a part identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// Tinted from its colour entry.
    Regular,
    /// Swappable decal, painted only by the mask-option pass.
    Pattern,
    /// Opt-in overlay, tinted only when its active tab is non-zero.
    Tattoo,
    /// Painted white in the final pass.
    Gloss,
}

impl PartKind {
    /// Classify an identifier. Pattern wins over tattoo, tattoo over gloss.
    pub fn classify(part: &str) -> Self {
        if is_pattern_slot(part) {
            PartKind::Pattern
        } else if is_tattoo(part) {
            PartKind::Tattoo
        } else if is_gloss(part) {
            PartKind::Gloss
        } else {
            PartKind::Regular
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            PartKind::Regular => "part",
            PartKind::Pattern => "pattern",
            PartKind::Tattoo => "tattoo",
            PartKind::Gloss => "gloss",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the part identifier of a mask file.
///
/// Takes the base name, strips a leading digit run, then drops everything
/// from the first `.` onward. Returns `None` when nothing is left.
///
/// `"03Shirt.png"` and `"Shirt.2.png"` both resolve to `"Shirt"`.
pub fn resolve_part_name(file_name: &str) -> Option<String> {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);

    let stripped = base.trim_start_matches(|c: char| c.is_ascii_digit());
    let part = stripped.split('.').next().unwrap_or("");

    if part.is_empty() {
        None
    } else {
        Some(part.to_string())
    }
}

/// Strip a leading digit run from an option identifier.
pub fn strip_numeric_prefix(name: &str) -> &str {
    let stripped = name.trim_start_matches(|c: char| c.is_ascii_digit());
    if stripped.is_empty() {
        name
    } else {
        stripped
    }
}

/// `Pat` followed by zero or more digits at the end of the identifier.
pub fn is_pattern_slot(part: &str) -> bool {
    let head = part.trim_end_matches(|c: char| c.is_ascii_digit());
    head.ends_with(PATTERN_KEYWORD)
}

/// One or more digits immediately followed by `tat` (any case) at the end.
pub fn is_tattoo(part: &str) -> bool {
    let Some(split) = part.len().checked_sub(TATTOO_KEYWORD.len()) else {
        return false;
    };
    if !part.is_char_boundary(split) {
        return false;
    }
    let (head, tail) = part.split_at(split);
    tail.eq_ignore_ascii_case(TATTOO_KEYWORD)
        && head.chars().next_back().is_some_and(|c| c.is_ascii_digit())
}

/// Contains `gloss` in any case.
pub fn is_gloss(part: &str) -> bool {
    part.to_ascii_lowercase().contains(GLOSS_KEYWORD)
}

/// Ends in one of the reserved highlight/shade suffixes.
pub fn is_shade_layer(part: &str) -> bool {
    SHADE_SUFFIXES.iter().any(|suffix| part.ends_with(suffix))
}
