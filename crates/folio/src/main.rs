//! Folio CLI binary.
//!
//! - `folio check` audits a chapter in a novel's working directory
//! - `folio duplicates` runs the duplicate-paragraph scan offline

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_check, run_duplicates};

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // --verbose wins over RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = folio::FolioConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check(args) => run_check(args, &config).await?,
        Commands::Duplicates(args) => run_duplicates(args, &config).await?,
    }

    Ok(())
}
