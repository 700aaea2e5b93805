//! Inspect command implementation.
//!
//! Lists the cataloged parts with their classification and what the
//! colour document says about each.

use std::path::PathBuf;

use clap::Args;

use crate::catalog::MaskCatalog;
use crate::discovery::{load_settings, locate_data_file};
use crate::error::{PaintError, Result};
use crate::output::{display_path, plural, Printer};
use crate::report::Report;
use crate::types::{ColourDocument, PartKind};

/// List cataloged parts and their colour/tab coverage
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory of greyscale part masks
    pub masks: PathBuf,

    /// Colour document (default: the first .sav file in the mask directory)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Settings file (default: maskpaint.yaml in the mask directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<()> {
    let settings = load_settings(&args.masks, args.config.as_deref())?;

    let document_path = match args.document {
        Some(path) => Some(path),
        None => match locate_data_file(&args.masks) {
            Ok(path) => Some(path),
            Err(PaintError::DataFileNotFound { .. }) => {
                printer.warning("Missing", "no .sav data file, listing masks only");
                None
            }
            Err(e) => return Err(e),
        },
    };

    let document = match &document_path {
        Some(path) => {
            printer.status("Reading", &display_path(path));
            Some(ColourDocument::load(path)?)
        }
        None => None,
    };

    let mut report = Report::new();
    let catalog = MaskCatalog::load(&args.masks, &settings, &mut report)?;
    printer.report(&report);
    printer.status(
        "Cataloged",
        &format!(
            "{} in {}",
            plural(catalog.len(), "mask", "masks"),
            display_path(&args.masks)
        ),
    );

    for line in inventory(&catalog, document.as_ref()) {
        println!("{}", line);
    }

    Ok(())
}

/// One tab-separated line per part, sorted by part identifier:
/// part, kind, file, colour, active tab.
pub fn inventory(catalog: &MaskCatalog, document: Option<&ColourDocument>) -> Vec<String> {
    catalog
        .sorted()
        .into_iter()
        .map(|entry| {
            let colour = document
                .and_then(|doc| doc.color(&entry.part))
                .map(|record| match record.to_colour() {
                    Some(colour) => colour.to_string(),
                    None => "incomplete".to_string(),
                })
                .unwrap_or_else(|| "-".to_string());

            let tab = document
                .and_then(|doc| doc.active_tabs.as_ref())
                .filter(|tabs| tabs.contains(&entry.part) || entry.kind == PartKind::Tattoo)
                .map(|tabs| tabs.value(&entry.part).to_string())
                .unwrap_or_else(|| "-".to_string());

            format!(
                "{}\t{}\t{}\t{}\t{}",
                entry.part,
                entry.kind,
                entry.file_name(),
                colour,
                tab
            )
        })
        .collect()
}
