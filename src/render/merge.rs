//! Merge pass: composite every tinted layer onto one canvas.

use image::RgbImage;

use crate::catalog::MaskCatalog;
use crate::error::{PaintError, Result};
use crate::types::{is_gloss, resolve_part_name};

use super::png::read_png;
use super::scratch::ScratchDir;
use super::stencil::{black_canvas, stencil_paste};

/// Paste the scratch layers, in file-name order, onto a black canvas.
///
/// Each layer is pasted through its part's cataloged mask. A layer whose
/// part is not in the catalog means scratch and catalog disagree, and is
/// an error.
pub fn merge_layers(catalog: &MaskCatalog, scratch: &ScratchDir) -> Result<RgbImage> {
    let (width, height) = catalog.dimensions()?;
    let mut canvas = black_canvas(width, height);

    for layer_path in scratch.layers() {
        let file_name = layer_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let part = resolve_part_name(&file_name)
            .ok_or_else(|| PaintError::MissingMask { part: file_name.clone() })?;

        if is_gloss(&part) {
            continue;
        }

        let entry = catalog.get(&part)?;
        let layer = read_png(&layer_path)?;
        stencil_paste(&mut canvas, &layer, &entry.mask)?;
    }

    Ok(canvas)
}
