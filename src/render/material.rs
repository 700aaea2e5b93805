//! Material category export: matte, glossy and metallic masks.
//!
//! Each active tab whose value is 0, 1 or 2 assigns the same-named mask in
//! the mask directory to a category. The category image is white wherever
//! any of its masks is, and black elsewhere.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::catalog::decode_mask;
use crate::error::Result;
use crate::report::{codes, Report};
use crate::types::{is_shade_layer, ActiveTabs, Colour, MaterialCategory};

use super::png::write_png;
use super::stencil::{black_canvas, paste_colour};

/// Category images that received at least one mask.
pub type CategoryMasks = BTreeMap<MaterialCategory, RgbImage>;

/// Build the category images from the active tabs.
pub fn export_categories(
    tabs: &ActiveTabs,
    mask_dir: &Path,
    report: &mut Report,
) -> Result<CategoryMasks> {
    let mut categories = CategoryMasks::new();

    for (option, value) in tabs.iter() {
        let Some(category) = MaterialCategory::from_tab(value) else {
            continue;
        };
        if is_shade_layer(option) {
            continue;
        }

        let path = mask_dir.join(format!("{}.png", option));
        if !path.is_file() {
            report.info(
                codes::CATEGORY_NO_MASK,
                format!("No mask for {} category option {}", category, option),
            );
            continue;
        }

        let mask = decode_mask(&path)?;
        let canvas = categories
            .entry(category)
            .or_insert_with(|| black_canvas(mask.width(), mask.height()));
        paste_colour(canvas, Colour::WHITE, &mask)?;
    }

    Ok(categories)
}

/// Output path of a category image, e.g. `outfit-tab1_glossy.png`.
pub fn category_path(base: &Path, category: MaterialCategory) -> PathBuf {
    let stem = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(format!("{}{}.png", stem, category.file_suffix()))
}

/// Save every category image next to `base`. Returns the written paths.
pub fn save_categories(categories: &CategoryMasks, base: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(categories.len());
    for (category, image) in categories {
        let path = category_path(base, *category);
        write_png(image, &path)?;
        written.push(path);
    }
    Ok(written)
}
