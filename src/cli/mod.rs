pub mod assemble;
pub mod completions;
pub mod inspect;

use clap::{Parser, Subcommand};

/// maskpaint - composite colour textures from greyscale part masks
#[derive(Parser, Debug)]
#[command(name = "maskpaint")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub assemble: assemble::AssembleArgs,

    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cataloged parts and their colour/tab coverage
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_default_assemble() {
        let cli = Cli::try_parse_from(["maskpaint", "outfit.sav", "masks", "--keep-scratch"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.assemble.document, Some(PathBuf::from("outfit.sav")));
        assert_eq!(cli.assemble.masks, Some(PathBuf::from("masks")));
        assert!(cli.assemble.keep_scratch);
    }

    #[test]
    fn test_parse_requires_both_positionals() {
        assert!(Cli::try_parse_from(["maskpaint", "outfit.sav"]).is_err());
    }

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::try_parse_from(["maskpaint", "inspect", "masks", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Inspect(_))));
    }
}
