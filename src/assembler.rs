//! The texture assembly pipeline.
//!
//! An [`Assembler`] loads the colour document and the mask catalog once,
//! then runs the passes in a fixed order against a scratch directory:
//!
//! 1. tint every paintable part into scratch
//! 2. merge the scratch layers onto a black canvas
//! 3. paint the selected pattern variants
//! 4. paint the gloss mask white
//!
//! The material category masks are derived separately from the active tabs.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::catalog::MaskCatalog;
use crate::discovery::Settings;
use crate::error::{PaintError, Result};
use crate::render::{
    apply_gloss, apply_mask_options, export_categories, merge_layers, save_categories, tint_parts,
    write_png, CategoryMasks, ScratchDir,
};
use crate::report::Report;
use crate::types::ColourDocument;

/// Loaded inputs for one texture.
#[derive(Debug)]
pub struct Assembler {
    document_path: PathBuf,
    mask_dir: PathBuf,
    settings: Settings,
    document: ColourDocument,
    catalog: MaskCatalog,
    load_report: Report,
}

/// The result of one run: the merged texture, the category masks and every
/// notice recorded on the way.
#[derive(Debug)]
pub struct Assembly {
    pub image: RgbImage,
    pub categories: CategoryMasks,
    pub report: Report,
}

impl Assembly {
    /// Save the merged texture as `<base>.png` and each category mask beside
    /// it. Returns the written paths, merged texture first.
    pub fn save(&self, base: &Path) -> Result<Vec<PathBuf>> {
        if let Some(parent) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PaintError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }

        let merged = merged_path(base);
        write_png(&self.image, &merged)?;

        let mut written = vec![merged];
        written.extend(save_categories(&self.categories, base)?);
        Ok(written)
    }
}

/// `<base>.png`, keeping any dots already in the base name.
pub fn merged_path(base: &Path) -> PathBuf {
    let stem = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(format!("{}.png", stem))
}

impl Assembler {
    /// Load the colour document and the mask catalog.
    ///
    /// Fails fast on a missing or malformed document; no catalog is built
    /// without colour data.
    pub fn new(
        document_path: impl Into<PathBuf>,
        mask_dir: impl Into<PathBuf>,
        settings: Settings,
    ) -> Result<Self> {
        let document_path = document_path.into();
        let mask_dir = mask_dir.into();

        let document = ColourDocument::load(&document_path)?;
        if !mask_dir.is_dir() {
            return Err(PaintError::Io {
                path: mask_dir,
                message: "Mask directory does not exist".to_string(),
            });
        }

        let mut load_report = Report::new();
        let catalog = MaskCatalog::load(&mask_dir, &settings, &mut load_report)?;

        Ok(Self::from_parts(
            document_path,
            settings,
            document,
            catalog,
            load_report,
        ))
    }

    /// Build an assembler from already loaded inputs.
    pub fn from_parts(
        document_path: impl Into<PathBuf>,
        settings: Settings,
        document: ColourDocument,
        catalog: MaskCatalog,
        load_report: Report,
    ) -> Self {
        Self {
            document_path: document_path.into(),
            mask_dir: catalog.root().to_path_buf(),
            settings,
            document,
            catalog,
            load_report,
        }
    }

    pub fn document(&self) -> &ColourDocument {
        &self.document
    }

    pub fn catalog(&self) -> &MaskCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mask_dir(&self) -> &Path {
        &self.mask_dir
    }

    /// Output path without extension: the document's stem, in the
    /// configured output directory or next to the document.
    pub fn output_base(&self) -> PathBuf {
        let stem = self
            .document_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "texture".to_string());

        let dir = match &self.settings.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .document_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        dir.join(stem)
    }

    /// Path of the merged texture.
    pub fn output_path(&self) -> PathBuf {
        merged_path(&self.output_base())
    }

    /// Open the scratch directory the settings ask for.
    pub fn open_scratch(&self) -> Result<ScratchDir> {
        match &self.settings.scratch {
            Some(path) => ScratchDir::persistent(path, self.settings.keep_scratch),
            None => ScratchDir::temporary_with(self.settings.keep_scratch),
        }
    }

    /// Run the tint, merge, mask-option and gloss passes.
    pub fn compose(&self, scratch: &ScratchDir, report: &mut Report) -> Result<RgbImage> {
        tint_parts(&self.catalog, &self.document, scratch, report)?;

        let mut canvas = merge_layers(&self.catalog, scratch)?;
        apply_mask_options(&mut canvas, &self.mask_dir, &self.document, report)?;
        apply_gloss(&mut canvas, &self.catalog, &self.settings, report)?;

        Ok(canvas)
    }

    /// Derive the material category masks. Empty when tabs are unset.
    pub fn categories(&self, report: &mut Report) -> Result<CategoryMasks> {
        match &self.document.active_tabs {
            Some(tabs) => export_categories(tabs, &self.mask_dir, report),
            None => Ok(CategoryMasks::new()),
        }
    }

    /// Compose the texture and derive the category masks.
    pub fn assemble(&self, scratch: &ScratchDir) -> Result<Assembly> {
        let mut report = self.load_report.clone();

        let image = self.compose(scratch, &mut report)?;
        let categories = self.categories(&mut report)?;

        Ok(Assembly {
            image,
            categories,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::codes;
    use image::{GrayImage, Luma};
    use tempfile::tempdir;

    fn setup(document: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let masks = dir.path().join("masks");
        fs::create_dir_all(&masks).unwrap();
        GrayImage::from_pixel(2, 2, Luma([255]))
            .save(masks.join("01Shirt.png"))
            .unwrap();

        let doc = dir.path().join("outfit.sav");
        fs::write(&doc, document).unwrap();
        (dir, doc, masks)
    }

    #[test]
    fn test_output_paths_follow_document() {
        let (dir, doc, masks) = setup(r#"[{"partColors": {}}]"#);
        let assembler = Assembler::new(&doc, &masks, Settings::default()).unwrap();

        assert_eq!(assembler.output_base(), dir.path().join("outfit"));
        assert_eq!(assembler.output_path(), dir.path().join("outfit.png"));
    }

    #[test]
    fn test_output_dir_setting() {
        let (dir, doc, masks) = setup(r#"[{"partColors": {}}]"#);
        let settings = Settings {
            output_dir: Some(dir.path().join("out")),
            ..Default::default()
        };
        let assembler = Assembler::new(&doc, &masks, settings).unwrap();

        assert_eq!(assembler.output_path(), dir.path().join("out/outfit.png"));
    }

    #[test]
    fn test_merged_path_keeps_dots() {
        assert_eq!(
            merged_path(Path::new("/a/outfit.v2")),
            PathBuf::from("/a/outfit.v2.png")
        );
    }

    #[test]
    fn test_missing_document_is_fatal() {
        let (dir, _, masks) = setup("[]");
        let result = Assembler::new(dir.path().join("nope.sav"), &masks, Settings::default());
        assert!(matches!(result, Err(PaintError::Io { .. })));
    }

    #[test]
    fn test_missing_mask_dir_is_fatal() {
        let (dir, doc, _) = setup(r#"[{"partColors": {}}]"#);
        let result = Assembler::new(&doc, dir.path().join("nowhere"), Settings::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_unset_tabs_skip_options_and_categories() {
        let (_dir, doc, masks) = setup(r#"[{"partColors": {}, "activeTabs": {"a": 1}}]"#);
        let assembler = Assembler::new(&doc, &masks, Settings::default()).unwrap();
        let scratch = ScratchDir::temporary().unwrap();

        let assembly = assembler.assemble(&scratch).unwrap();
        assert!(assembly.report.has_code(codes::TABS_UNSET));
        assert!(assembly.categories.is_empty());
    }

    #[test]
    fn test_save_writes_merged_first() {
        let (dir, doc, masks) = setup(r#"[{"partColors": {"Shirt": {"r": 0, "g": 0, "b": 1}}}]"#);
        let assembler = Assembler::new(&doc, &masks, Settings::default()).unwrap();
        let scratch = ScratchDir::temporary().unwrap();

        let assembly = assembler.assemble(&scratch).unwrap();
        let written = assembly.save(&assembler.output_base()).unwrap();

        assert_eq!(written, vec![dir.path().join("outfit.png")]);
        let img = image::open(&written[0]).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255]);
    }
}
