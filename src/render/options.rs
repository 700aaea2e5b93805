//! Mask-option pass: paint the selected pattern variants onto the canvas.
//!
//! A pattern slot option `ShirtPat = 2` selects `Pat2.png`, or failing that
//! `ShirtPat_V2.png`, from the top of the mask directory. The variant is
//! tinted with the option's own colour entry.

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::catalog::decode_mask;
use crate::error::Result;
use crate::report::{codes, Report};
use crate::types::{is_pattern_slot, strip_numeric_prefix, ActiveTabs, Colour, ColourDocument};

use super::stencil::paste_colour;

/// Candidate file names for a pattern option, in lookup order.
pub fn variant_file_names(option: &str, value: i64) -> [String; 2] {
    [
        format!("Pat{}.png", value),
        format!("{}_V{}.png", strip_numeric_prefix(option), value),
    ]
}

/// Find the variant mask file for a pattern option.
///
/// Returns `None` for non-pattern options, zero selectors, or when no
/// candidate file exists.
pub fn find_mask_option(mask_dir: &Path, option: &str, value: i64) -> Option<PathBuf> {
    if !is_pattern_slot(option) || value == 0 {
        return None;
    }

    variant_file_names(option, value)
        .into_iter()
        .map(|name| mask_dir.join(name))
        .find(|path| path.is_file())
}

/// Paint every active pattern option onto `canvas`, in tab order.
///
/// Missing variant files and missing colour entries skip the option with a
/// warning. An incomplete colour entry falls back to white, also with a
/// warning.
pub fn apply_mask_options(
    canvas: &mut RgbImage,
    mask_dir: &Path,
    document: &ColourDocument,
    report: &mut Report,
) -> Result<()> {
    let Some(tabs) = &document.active_tabs else {
        report.warning(
            codes::TABS_UNSET,
            "Unable to apply mask options, no values for activeTabs found",
        );
        return Ok(());
    };

    for (option, value) in pattern_options(tabs) {
        let Some(path) = find_mask_option(mask_dir, option, value) else {
            report.warning(
                codes::OPTION_NO_MASK,
                format!("No mask found for {}.{}.png", option, value),
            );
            continue;
        };

        let Some(record) = document.color(option) else {
            report.warning(
                codes::OPTION_NO_COLOR,
                format!("No color information found for {}.{}.png", option, value),
            );
            continue;
        };

        let colour = record.to_colour().unwrap_or_else(|| {
            report.warning(
                codes::COLOR_FALLBACK,
                format!("Incomplete color for mask option <{}>, using white", option),
            );
            Colour::WHITE
        });
        let mask = decode_mask(&path)?;
        paste_colour(canvas, colour, &mask)?;

        report.info(
            codes::OPTION_APPLIED,
            format!("Mask option {}.{} applied from {}", option, value, path.display()),
        );
    }

    Ok(())
}

fn pattern_options(tabs: &ActiveTabs) -> impl Iterator<Item = (&str, i64)> {
    tabs.iter()
        .filter(|(option, value)| *value != 0 && is_pattern_slot(option))
}
