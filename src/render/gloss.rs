//! Gloss pass: paint white through the first gloss mask in the mask tree.

use image::RgbImage;

use crate::catalog::MaskCatalog;
use crate::discovery::{scan_masks, Settings};
use crate::error::Result;
use crate::report::{codes, Report};
use crate::types::{is_gloss, resolve_part_name, Colour};

use super::stencil::paste_colour;

/// Find the part identifier of the first gloss mask, in scan order.
pub fn find_gloss_part(catalog: &MaskCatalog, settings: &Settings) -> Option<String> {
    scan_masks(catalog.root(), settings)
        .iter()
        .filter_map(|path| path.file_name().and_then(|n| n.to_str()))
        .filter_map(resolve_part_name)
        .find(|part| is_gloss(part))
}

/// Paint a white layer through the gloss mask. Returns whether one was found.
pub fn apply_gloss(
    canvas: &mut RgbImage,
    catalog: &MaskCatalog,
    settings: &Settings,
    report: &mut Report,
) -> Result<bool> {
    let Some(part) = find_gloss_part(catalog, settings) else {
        report.info(codes::GLOSS_MISSING, "No gloss part found");
        return Ok(false);
    };

    let entry = catalog.get(&part)?;
    paste_colour(canvas, Colour::WHITE, &entry.mask)?;
    report.info(
        codes::GLOSS_APPLIED,
        format!("Applied gloss from {}", entry.path.display()),
    );

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::stencil::black_canvas;
    use image::{GrayImage, Luma};
    use tempfile::tempdir;

    #[test]
    fn test_gloss_paints_white() {
        let dir = tempdir().unwrap();
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(0, 0, Luma([255]));
        mask.save(dir.path().join("09Gloss.png")).unwrap();
        GrayImage::new(2, 1).save(dir.path().join("01Shirt.png")).unwrap();

        let mut report = Report::new();
        let settings = Settings::default();
        let catalog = MaskCatalog::load(dir.path(), &settings, &mut report).unwrap();

        let mut canvas = black_canvas(2, 1);
        assert!(apply_gloss(&mut canvas, &catalog, &settings, &mut report).unwrap());
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(1, 0).0, [0, 0, 0]);
        assert!(report.has_code(codes::GLOSS_APPLIED));
    }

    #[test]
    fn test_no_gloss_leaves_canvas() {
        let dir = tempdir().unwrap();
        GrayImage::from_pixel(2, 1, Luma([255]))
            .save(dir.path().join("Shirt.png"))
            .unwrap();

        let mut report = Report::new();
        let settings = Settings::default();
        let catalog = MaskCatalog::load(dir.path(), &settings, &mut report).unwrap();

        let mut canvas = black_canvas(2, 1);
        assert!(!apply_gloss(&mut canvas, &catalog, &settings, &mut report).unwrap());
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0]));
        assert!(report.has_code(codes::GLOSS_MISSING));
    }

    #[test]
    fn test_first_gloss_wins() {
        let dir = tempdir().unwrap();
        GrayImage::new(1, 1).save(dir.path().join("01HairGloss.png")).unwrap();
        GrayImage::new(1, 1).save(dir.path().join("02SkinGloss.png")).unwrap();

        let mut report = Report::new();
        let settings = Settings::default();
        let catalog = MaskCatalog::load(dir.path(), &settings, &mut report).unwrap();

        assert_eq!(find_gloss_part(&catalog, &settings).as_deref(), Some("HairGloss"));
    }
}
