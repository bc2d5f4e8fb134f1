//! Command-line arguments.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the portfolio site builder.
#[derive(Parser, Debug)]
#[command(
    name = "portfolio",
    about = "Build the portfolio site from HTML shells, template fragments and JSON data",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without writing anything
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the project root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Render page sections sequentially (parallel is enabled by default)
    #[arg(long = "no-parallel", global = true, action = clap::ArgAction::SetFalse)]
    pub parallel: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the site into the output directory
    Build(BuildOpts),
    /// Render a single template fragment against the project data
    Render(RenderOpts),
    /// Report diagnostics for every template fragment
    Check,
    /// Print version information
    Version,
}

/// Options for the `build` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct BuildOpts {
    /// Fail when any template produces diagnostics
    #[arg(long)]
    pub strict: bool,

    /// Remove the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Skip specific tasks
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Options for the `render` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RenderOpts {
    /// Template fragment name or path, relative to the templates directory
    pub template: PathBuf,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when the template produces diagnostics
    #[arg(long)]
    pub strict: bool,
}
