//! Assemble command implementation.
//!
//! Composites the colour texture and category masks for one document.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;

use crate::assembler::Assembler;
use crate::discovery::load_settings;
use crate::error::{PaintError, Result};
use crate::output::{display_path, plural, Printer};

/// Composite a colour texture from a document and a mask directory
#[derive(Args, Debug, Default)]
pub struct AssembleArgs {
    /// Colour document (JSON) holding partColors and activeTabs
    #[arg(required = true)]
    pub document: Option<PathBuf>,

    /// Directory of greyscale part masks
    #[arg(required = true)]
    pub masks: Option<PathBuf>,

    /// Persistent scratch directory for tinted layers
    #[arg(long)]
    pub scratch: Option<PathBuf>,

    /// Keep the scratch directory after the run
    #[arg(long)]
    pub keep_scratch: bool,

    /// Settings file (default: maskpaint.yaml in the mask directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory (default: next to the document)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: AssembleArgs, printer: &Printer) -> Result<Vec<PathBuf>> {
    let (Some(document), Some(masks)) = (args.document, args.masks) else {
        return Err(PaintError::Config {
            message: "A colour document and a mask directory are required".to_string(),
            help: Some("Usage: maskpaint <DOCUMENT> <MASKS>".to_string()),
        });
    };

    let started = Instant::now();

    let mut settings = load_settings(&masks, args.config.as_deref())?;
    if args.scratch.is_some() {
        settings.scratch = args.scratch;
    }
    if args.keep_scratch {
        settings.keep_scratch = true;
    }
    if args.output_dir.is_some() {
        settings.output_dir = args.output_dir;
    }

    printer.status(
        "Loading",
        &format!("{} with masks from {}", display_path(&document), display_path(&masks)),
    );
    let assembler = Assembler::new(&document, &masks, settings)?;
    printer.status(
        "Cataloged",
        &plural(assembler.catalog().len(), "mask", "masks"),
    );

    let scratch = assembler.open_scratch()?;
    printer.info("Scratch", &printer.cyan(&display_path(scratch.path())));

    let assembly = assembler.assemble(&scratch)?;
    printer.report(&assembly.report);

    let written = assembly.save(&assembler.output_base())?;
    for path in &written {
        printer.status("Wrote", &display_path(path));
    }

    printer.status(
        "Finished",
        &format!(
            "{} in {:.2}s {}",
            plural(written.len(), "image", "images"),
            started.elapsed().as_secs_f64(),
            printer.dim(&format!("({})", plural(assembly.report.warning_count(), "warning", "warnings")))
        ),
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_writes_outputs() {
        let dir = tempdir().unwrap();
        let masks = dir.path().join("masks");
        fs::create_dir_all(&masks).unwrap();
        GrayImage::from_pixel(2, 2, Luma([255]))
            .save(masks.join("Shirt.png"))
            .unwrap();

        let document = dir.path().join("outfit.sav");
        fs::write(
            &document,
            r#"[{"partColors": {"Shirt": {"r": 1, "g": 0, "b": 0}},
                 "activeTabs": {"Shirt": 2, "b": 9, "c": 9}}]"#,
        )
        .unwrap();

        let args = AssembleArgs {
            document: Some(document),
            masks: Some(masks),
            output_dir: Some(dir.path().join("out")),
            ..Default::default()
        };

        let written = run(args, &Printer::new().quiet(true)).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("out/outfit.png"),
                dir.path().join("out/outfit-tab2_metallic.png"),
            ]
        );
        let img = image::open(&written[0]).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0]);
    }

    #[test]
    fn test_run_requires_inputs() {
        let result = run(AssembleArgs::default(), &Printer::new().quiet(true));
        assert!(matches!(result, Err(PaintError::Config { .. })));
    }
}
