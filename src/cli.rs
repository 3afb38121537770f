//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Args, Parser};

/// Top-level CLI entry point for the linker.
#[derive(Parser, Debug)]
#[command(
    name = "linker",
    about = "Activate a generation of managed symlinks",
    version = option_env!("LINKER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Links file recorded by the previous activation
    pub old: PathBuf,

    /// Links file of the generation to activate
    pub new: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Activation switches.
    #[command(flatten)]
    pub activate: ActivateOpts,
}

/// Behaviour switches for an activation.
///
/// Each flag can also be enabled by setting the matching environment
/// variable to any value; see [`crate::config::ActivateOptions::resolve`].
#[derive(Args, Debug, Clone, Default)]
pub struct ActivateOpts {
    /// Print the transactions instead of applying them [env: DRY_RUN]
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Only check for problems; change nothing [env: CHECK_ONLY]
    #[arg(short = 'c', long)]
    pub check_only: bool,

    /// Treat unrecorded links that are already correct as managed [env: ADOPT_IDENTICAL_LINKS]
    #[arg(long)]
    pub adopt_identical_links: bool,
}
