//! Command-line interface for the Huddle ranking engine.
//!
//! The CLI is the concrete "calling layer": it loads a JSON ranking request
//! plus JSON fixtures of candidate groups (and, for the interest pipeline,
//! user tags), assembles in-memory collaborators, runs the requested
//! pipeline, and writes the ranking as pretty JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod rank;

pub use error::CliError;

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_GROUPS: &str = "groups";
pub(crate) const ARG_INTERESTS: &str = "interests";
pub(crate) const ENV_POPULAR_REQUEST: &str = "HUDDLE_CMDS_POPULAR_REQUEST_PATH";
pub(crate) const ENV_POPULAR_GROUPS: &str = "HUDDLE_CMDS_POPULAR_GROUPS";
pub(crate) const ENV_INTERESTS_REQUEST: &str = "HUDDLE_CMDS_INTERESTS_REQUEST_PATH";
pub(crate) const ENV_INTERESTS_GROUPS: &str = "HUDDLE_CMDS_INTERESTS_GROUPS";

/// Run the Huddle CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering,
/// fixture loading, or ranking fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Popular(args) => rank::run_popular(args),
        Command::Interests(args) => rank::run_interests(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "huddle",
    about = "Offline ranking utilities for the Huddle engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank groups by popularity blended with proximity.
    Popular(rank::PopularArgs),
    /// Rank groups by interest-tag similarity blended with proximity.
    Interests(rank::InterestsArgs),
}
