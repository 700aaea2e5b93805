use clap::Parser;
use maskpaint::cli::{Cli, Commands};
use maskpaint::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Some(Commands::Inspect(args)) => maskpaint::cli::inspect::run(args, &printer)?,
        Some(Commands::Completions(args)) => maskpaint::cli::completions::run(args)?,
        None => {
            maskpaint::cli::assemble::run(cli.assemble, &printer)?;
        }
    }

    Ok(())
}
