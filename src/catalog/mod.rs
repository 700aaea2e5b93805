//! The mask catalog: every greyscale mask keyed by part identifier.
//!
//! Duplicate identifiers follow a last-discovered-wins policy. Discovery
//! order is file-name order (see [`scan_masks`]), and each replacement is
//! reported so collisions never pass unnoticed.

use std::path::{Path, PathBuf};

use image::GrayImage;
use indexmap::IndexMap;

use crate::discovery::{scan_masks, Settings};
use crate::error::{PaintError, Result};
use crate::report::{codes, Report};
use crate::types::{resolve_part_name, PartKind};

/// A decoded mask and what it belongs to.
#[derive(Debug, Clone)]
pub struct MaskEntry {
    /// Where the mask was loaded from.
    pub path: PathBuf,
    /// Canonical part identifier.
    pub part: String,
    /// Classification of `part`, computed once on load.
    pub kind: PartKind,
    /// Single-channel greyscale pixels.
    pub mask: GrayImage,
}

impl MaskEntry {
    pub fn new(path: impl Into<PathBuf>, part: impl Into<String>, mask: GrayImage) -> Self {
        let part = part.into();
        Self {
            path: path.into(),
            kind: PartKind::classify(&part),
            part,
            mask,
        }
    }

    /// The file name the mask was loaded from.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.png", self.part))
    }
}

/// Part identifier to mask lookup.
#[derive(Debug, Clone, Default)]
pub struct MaskCatalog {
    root: PathBuf,
    entries: IndexMap<String, MaskEntry>,
}

impl MaskCatalog {
    /// An empty catalog rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: IndexMap::new(),
        }
    }

    /// Walk `root` and decode every mask file.
    pub fn load(root: &Path, settings: &Settings, report: &mut Report) -> Result<Self> {
        let mut catalog = Self::new(root);

        for path in scan_masks(root, settings) {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let Some(part) = resolve_part_name(&file_name) else {
                report.info(
                    codes::UNNAMED_MASK,
                    format!("Skipping unknown mask file {} (no part name)", file_name),
                );
                continue;
            };

            let mask = decode_mask(&path)?;
            catalog.insert(MaskEntry::new(path, part, mask), report);
        }

        Ok(catalog)
    }

    /// Add an entry, replacing any earlier entry with the same identifier.
    pub fn insert(&mut self, entry: MaskEntry, report: &mut Report) {
        if let Some(previous) = self.entries.get(&entry.part) {
            report.warning(
                codes::DUPLICATE_PART,
                format!(
                    "Part '{}' from {} replaces {}",
                    entry.part,
                    entry.path.display(),
                    previous.path.display()
                ),
            );
        }
        self.entries.insert(entry.part.clone(), entry);
    }

    /// Look up a mask by part identifier.
    pub fn get(&self, part: &str) -> Result<&MaskEntry> {
        self.entries.get(part).ok_or_else(|| PaintError::MissingMask {
            part: part.to_string(),
        })
    }

    pub fn contains(&self, part: &str) -> bool {
        self.entries.contains_key(part)
    }

    /// Canvas size for the run, taken from the first cataloged mask.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        self.entries
            .values()
            .next()
            .map(|entry| entry.mask.dimensions())
            .ok_or_else(|| PaintError::EmptyCatalog {
                dir: self.root.clone(),
            })
    }

    /// Entries sorted by part identifier.
    pub fn sorted(&self) -> Vec<&MaskEntry> {
        let mut entries: Vec<&MaskEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.part.cmp(&b.part));
        entries
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &MaskEntry> {
        self.entries.values()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode an image file and convert it to 8-bit greyscale.
pub fn decode_mask(path: &Path) -> Result<GrayImage> {
    let bytes = std::fs::read(path).map_err(|e| PaintError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read mask: {}", e),
    })?;

    image::load_from_memory(&bytes)
        .map(|img| img.to_luma8())
        .map_err(|e| PaintError::Image {
            path: path.to_path_buf(),
            message: format!("Failed to decode mask: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use std::fs;
    use tempfile::tempdir;

    fn write_mask(path: &Path, width: u32, height: u32, value: u8) {
        GrayImage::from_pixel(width, height, Luma([value]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_load_keys_by_part_name() {
        let dir = tempdir().unwrap();
        write_mask(&dir.path().join("01Shirt.png"), 4, 2, 255);
        write_mask(&dir.path().join("02Pants.png"), 4, 2, 128);

        let mut report = Report::new();
        let catalog = MaskCatalog::load(dir.path(), &Settings::default(), &mut report).unwrap();

        assert_eq!(catalog.len(), 2);
        let shirt = catalog.get("Shirt").unwrap();
        assert_eq!(shirt.kind, PartKind::Regular);
        assert_eq!(shirt.file_name(), "01Shirt.png");
        assert_eq!(catalog.get("Pants").unwrap().mask.get_pixel(0, 0)[0], 128);
        assert_eq!(catalog.dimensions().unwrap(), (4, 2));
        assert!(report.is_empty());
    }

    #[test]
    fn test_missing_part_is_keyed_failure() {
        let catalog = MaskCatalog::new("masks");
        let err = catalog.get("Nope").unwrap_err();
        assert!(matches!(err, PaintError::MissingMask { part } if part == "Nope"));
    }

    #[test]
    fn test_duplicate_last_wins() {
        let dir = tempdir().unwrap();
        write_mask(&dir.path().join("01Shirt.png"), 2, 2, 10);
        write_mask(&dir.path().join("02Shirt.png"), 2, 2, 20);

        let mut report = Report::new();
        let catalog = MaskCatalog::load(dir.path(), &Settings::default(), &mut report).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Shirt").unwrap().mask.get_pixel(0, 0)[0], 20);
        assert!(report.has_code(codes::DUPLICATE_PART));
    }

    #[test]
    fn test_unnamed_masks_skipped() {
        let dir = tempdir().unwrap();
        write_mask(&dir.path().join("42.png"), 2, 2, 255);

        let mut report = Report::new();
        let catalog = MaskCatalog::load(dir.path(), &Settings::default(), &mut report).unwrap();

        assert!(catalog.is_empty());
        assert!(report.has_code(codes::UNNAMED_MASK));
    }

    #[test]
    fn test_empty_catalog_has_no_dimensions() {
        let catalog = MaskCatalog::new("masks");
        assert!(matches!(
            catalog.dimensions(),
            Err(PaintError::EmptyCatalog { .. })
        ));
    }

    #[test]
    fn test_colour_masks_become_greyscale() {
        let dir = tempdir().unwrap();
        image::RgbImage::from_pixel(1, 1, image::Rgb([255, 255, 255]))
            .save(dir.path().join("Hat.png"))
            .unwrap();

        let mut report = Report::new();
        let catalog = MaskCatalog::load(dir.path(), &Settings::default(), &mut report).unwrap();
        assert_eq!(catalog.get("Hat").unwrap().mask.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_undecodable_mask_is_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Broken.png"), b"not a png").unwrap();

        let mut report = Report::new();
        let result = MaskCatalog::load(dir.path(), &Settings::default(), &mut report);
        assert!(matches!(result, Err(PaintError::Image { .. })));
    }

    #[test]
    fn test_sorted_by_part() {
        let mut catalog = MaskCatalog::new("masks");
        let mut report = Report::new();
        for part in ["Zip", "Arm", "Moo"] {
            catalog.insert(MaskEntry::new(format!("{part}.png"), part, GrayImage::new(1, 1)), &mut report);
        }

        let parts: Vec<&str> = catalog.sorted().iter().map(|e| e.part.as_str()).collect();
        assert_eq!(parts, vec!["Arm", "Moo", "Zip"]);
    }
}
