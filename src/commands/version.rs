//! Command: print version information.
use std::io::Write as _;

use anyhow::Result;

/// Version string: the git-described build version, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("PORTFOLIO_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the portfolio version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    writeln!(std::io::stdout().lock(), "portfolio {}", version())?;
    Ok(())
}
