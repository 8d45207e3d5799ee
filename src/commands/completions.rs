//! `completions`: print a shell completion script.
use std::io::Write as _;

use anyhow::{Context as _, Result};
use clap::CommandFactory;

use crate::cli::{Cli, CompletionsOpts};

/// Write the completion script for `opts.shell` to `out`.
pub fn generate(opts: &CompletionsOpts, out: &mut dyn std::io::Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(opts.shell, &mut cmd, "no", out);
}

/// Print the completion script to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed.
pub fn run(opts: &CompletionsOpts) -> Result<()> {
    let mut stdout = std::io::stdout();
    generate(opts, &mut stdout);
    stdout.flush().context("failed to write completions")
}
