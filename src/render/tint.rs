//! Tint pass: one solid-colour layer per regular part, written to scratch.

use std::path::PathBuf;

use crate::catalog::MaskCatalog;
use crate::error::Result;
use crate::report::{codes, Report};
use crate::types::{is_gloss, Colour, ColourDocument, PartKind};

use super::png::write_png;
use super::scratch::ScratchDir;
use super::stencil::tint_mask;

/// Resolve the tint for a part, falling back to white.
///
/// A missing entry and an entry lacking any channel both fall back.
pub fn part_colour(document: &ColourDocument, part: &str, report: &mut Report) -> Colour {
    match document.color(part) {
        None => {
            report.warning(
                codes::COLOR_FALLBACK,
                format!("No color info found for part <{}>, using white", part),
            );
            Colour::WHITE
        }
        Some(record) => record.to_colour().unwrap_or_else(|| {
            report.warning(
                codes::COLOR_FALLBACK,
                format!("Incomplete color for part <{}>, using white", part),
            );
            Colour::WHITE
        }),
    }
}

/// Whether the tint pass paints this part.
///
/// Pattern slots and gloss are painted by later passes. Tattoos need a
/// non-zero active tab, unless active tabs are unset altogether, and are
/// still dropped if their name mentions gloss.
fn should_tint(kind: PartKind, part: &str, document: &ColourDocument, report: &mut Report) -> bool {
    match kind {
        PartKind::Pattern | PartKind::Gloss => false,
        PartKind::Tattoo => match &document.active_tabs {
            Some(tabs) if tabs.value(part) == 0 => {
                report.info(
                    codes::TATTOO_HIDDEN,
                    format!("Tattoo <{}> is not active", part),
                );
                false
            }
            _ => !is_gloss(part),
        },
        PartKind::Regular => true,
    }
}

/// Clear the scratch directory and write a tinted layer for every paintable
/// part, in part-identifier order. Layers keep their mask's file name.
pub fn tint_parts(
    catalog: &MaskCatalog,
    document: &ColourDocument,
    scratch: &ScratchDir,
    report: &mut Report,
) -> Result<Vec<PathBuf>> {
    scratch.clear(report);

    let mut written = Vec::new();
    for entry in catalog.sorted() {
        if !should_tint(entry.kind, &entry.part, document, report) {
            continue;
        }

        let colour = part_colour(document, &entry.part, report);
        let layer = tint_mask(&entry.mask, colour);
        let path = scratch.layer_path(&entry.file_name());
        write_png(&layer, &path)?;
        written.push(path);
    }

    Ok(written)
}
