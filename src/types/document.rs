//! The colour document: per-part tints and active-tab selectors.
//!
//! The document is a JSON array whose first element carries `partColors`
//! and `activeTabs`. A bare top-level object is accepted as well.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{PaintError, Result};

use super::Colour;

/// Minimum number of keys before `activeTabs` is honoured.
pub const MIN_ACTIVE_TABS: usize = 3;

/// A colour record with unit-float channels. Any channel may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PartColor {
    #[serde(default)]
    pub r: Option<f64>,
    #[serde(default)]
    pub g: Option<f64>,
    #[serde(default)]
    pub b: Option<f64>,
}

impl PartColor {
    /// A complete record.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: Some(r),
            g: Some(g),
            b: Some(b),
        }
    }

    /// The byte colour, or `None` if any channel is missing.
    pub fn to_colour(&self) -> Option<Colour> {
        match (self.r, self.g, self.b) {
            (Some(r), Some(g), Some(b)) => Some(Colour::from_unit(r, g, b)),
            _ => None,
        }
    }
}

/// Material category selected by an active-tab value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialCategory {
    Matte,
    Glossy,
    Metallic,
}

impl MaterialCategory {
    /// All categories in tab order.
    pub const ALL: [MaterialCategory; 3] = [
        MaterialCategory::Matte,
        MaterialCategory::Glossy,
        MaterialCategory::Metallic,
    ];

    /// Map a tab value to a category. Values outside 0..=2 have none.
    pub fn from_tab(value: i64) -> Option<Self> {
        match value {
            0 => Some(MaterialCategory::Matte),
            1 => Some(MaterialCategory::Glossy),
            2 => Some(MaterialCategory::Metallic),
            _ => None,
        }
    }

    /// The tab value for this category.
    pub fn tab(self) -> i64 {
        match self {
            MaterialCategory::Matte => 0,
            MaterialCategory::Glossy => 1,
            MaterialCategory::Metallic => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialCategory::Matte => "matte",
            MaterialCategory::Glossy => "glossy",
            MaterialCategory::Metallic => "metallic",
        }
    }

    /// File name suffix, e.g. `-tab1_glossy`.
    pub fn file_suffix(self) -> String {
        format!("-tab{}_{}", self.tab(), self.name())
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Active-tab selectors in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveTabs {
    tabs: IndexMap<String, i64>,
}

impl ActiveTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, option: impl Into<String>, value: i64) {
        self.tabs.insert(option.into(), value);
    }

    /// Selector for an option; absent options read as zero.
    pub fn value(&self, option: &str) -> i64 {
        self.tabs.get(option).copied().unwrap_or(0)
    }

    pub fn contains(&self, option: &str) -> bool {
        self.tabs.contains_key(option)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.tabs.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ActiveTabs {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            tabs: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A tab value as it may appear in the document.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTab {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl RawTab {
    fn value(self) -> i64 {
        match self {
            RawTab::Int(v) => v,
            RawTab::Float(v) => v.trunc() as i64,
            RawTab::Bool(b) => i64::from(b),
        }
    }
}

fn deserialize_tabs<'de, D>(deserializer: D) -> std::result::Result<Option<ActiveTabs>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, RawTab>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|tabs| tabs.into_iter().map(|(k, v)| (k, v.value())).collect()))
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "partColors", default)]
    part_colors: Option<IndexMap<String, PartColor>>,
    #[serde(rename = "activeTabs", default, deserialize_with = "deserialize_tabs")]
    active_tabs: Option<ActiveTabs>,
}

fn invalid_document(e: serde_json::Error) -> PaintError {
    PaintError::Config {
        message: format!("Invalid colour document: {}", e),
        help: Some("Expected a JSON array holding one object with partColors and activeTabs".to_string()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// The parsed colour document.
#[derive(Debug, Clone, Default)]
pub struct ColourDocument {
    /// Part identifier to colour record.
    pub part_colors: IndexMap<String, PartColor>,
    /// Active tabs, `None` when absent or too small to be honoured.
    pub active_tabs: Option<ActiveTabs>,
}

impl ColourDocument {
    /// Load a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PaintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read colour document: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a document from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(invalid_document)?;

        let entry = match value {
            serde_json::Value::Array(entries) => entries
                .into_iter()
                .next()
                .ok_or_else(|| PaintError::config("Colour document array is empty"))?,
            object @ serde_json::Value::Object(_) => object,
            other => {
                return Err(PaintError::config(format!(
                    "Colour document must be an array or an object, found {}",
                    json_kind(&other)
                )))
            }
        };
        let entry: RawEntry = serde_json::from_value(entry).map_err(invalid_document)?;

        let part_colors = entry.part_colors.ok_or_else(|| PaintError::Config {
            message: "partColors missing from colour document".to_string(),
            help: Some("Add a partColors object mapping part names to {r, g, b}".to_string()),
        })?;

        let active_tabs = entry
            .active_tabs
            .filter(|tabs| tabs.len() >= MIN_ACTIVE_TABS);

        Ok(Self {
            part_colors,
            active_tabs,
        })
    }

    /// Look up the colour record for a part.
    pub fn color(&self, part: &str) -> Option<&PartColor> {
        self.part_colors.get(part)
    }
}
