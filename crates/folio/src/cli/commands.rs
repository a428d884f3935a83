//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Folio - consistency auditor for serialized fiction
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Audit new chapters against the story so far", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a chapter against the novel's setting, characters, summary and plot threads
    Check(CheckArgs),

    /// Scan a chapter for repeated paragraphs without calling a model
    Duplicates(DuplicatesArgs),
}

/// Arguments for `folio check`
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Chapter number (1-based)
    #[arg(long)]
    pub chapter: u32,

    /// Novel working directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Chapter text (default: <dir>/chapters/chapter_<N>.txt)
    #[arg(long)]
    pub chapter_file: Option<PathBuf>,

    /// Novel setting (default: <dir>/Novel_architecture.txt)
    #[arg(long)]
    pub setting: Option<PathBuf>,

    /// Character state (default: <dir>/character_state.txt)
    #[arg(long)]
    pub characters: Option<PathBuf>,

    /// Global summary (default: <dir>/global_summary.txt)
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Plot threads (default: <dir>/plot_arcs.txt)
    #[arg(long)]
    pub plot_arcs: Option<PathBuf>,

    /// Print the report without updating plot arcs or writing the report file
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for `folio duplicates`
#[derive(Args, Debug)]
pub struct DuplicatesArgs {
    /// Chapter text to scan
    pub file: PathBuf,

    /// Previous chapter to compare against
    #[arg(long)]
    pub previous: Option<PathBuf>,

    /// Similarity threshold in [0, 1] (default from configuration)
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["folio", "check", "--chapter", "3"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.chapter, 3);
                assert_eq!(args.dir, PathBuf::from("."));
                assert!(args.chapter_file.is_none());
                assert!(!args.no_save);
            }
            Commands::Duplicates(_) => panic!("expected check"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "folio",
            "duplicates",
            "chapter.txt",
            "--previous",
            "prev.txt",
            "--threshold",
            "0.6",
            "--verbose",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Duplicates(args) => {
                assert_eq!(args.file, PathBuf::from("chapter.txt"));
                assert_eq!(args.threshold, Some(0.6));
            }
            Commands::Check(_) => panic!("expected duplicates"),
        }
    }

    #[test]
    fn test_chapter_is_required() {
        assert!(Cli::try_parse_from(["folio", "check"]).is_err());
    }
}
