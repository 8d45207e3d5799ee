//! `version`: print version information.
use std::io::Write as _;

use anyhow::{Context as _, Result};

/// Version string embedded at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("NO_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn run() -> Result<()> {
    writeln!(std::io::stdout(), "no {}", version()).context("failed to write version")
}
