//! Command-line entry point for the portfolio site builder.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use portfolio_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let command = match &args.command {
        cli::Command::Build(_) => "build",
        cli::Command::Render(_) => "render",
        cli::Command::Check => "check",
        cli::Command::Version => return commands::version::run(),
    };
    logging::init_subscriber(args.verbose, command);
    let log = Arc::new(logging::Logger::new(command));

    match &args.command {
        cli::Command::Build(opts) => commands::build::run(&args.global, opts, &log),
        cli::Command::Render(opts) => commands::render::run(&args.global, opts, &log),
        cli::Command::Check => commands::check::run(&args.global, &log),
        cli::Command::Version => commands::version::run(),
    }
}
