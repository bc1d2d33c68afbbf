//! CLI command definitions and handlers.

pub mod check;
pub mod tiles;

use clap::{Parser, Subcommand};

/// upload-qa - Detect dark and blurry photos
#[derive(Parser)]
#[command(name = "upload-qa")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Check images for darkness and blur
    Check(check::CheckArgs),
    /// Print the analysis regions for an image size
    Tiles(tiles::TilesArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image passed.
    Success = 0,
    /// At least one image was dark or blurry.
    IssuesFound = 1,
    /// The run itself failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
