//! Command-line interface module.

mod check;
mod commands;
mod duplicates;

pub use check::run_check;
pub use commands::{Cli, Commands};
pub use duplicates::run_duplicates;
