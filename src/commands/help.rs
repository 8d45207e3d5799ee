//! `help`: print top-level usage.
use std::io::Write as _;

use anyhow::{Context as _, Result};
use clap::CommandFactory;
use clap::error::ErrorKind;

use crate::cli::Cli;

/// Render the top-level usage: every subcommand and the global options.
#[must_use]
pub fn render() -> String {
    Cli::command().render_long_help().to_string()
}

/// Full usage to print after a parse error, if the error calls for it.
///
/// An unknown subcommand leaves the user without a list of the real ones,
/// so it gets the same text as `no help`.
#[must_use]
pub fn usage_after_error(err: &clap::Error) -> Option<String> {
    (err.kind() == ErrorKind::InvalidSubcommand).then(render)
}

/// Print top-level usage to stdout.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn run() -> Result<()> {
    writeln!(std::io::stdout(), "{}", render()).context("failed to write help")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn help_lists_every_subcommand() {
        let help = render();
        for name in ["garbage", "home", "rebuild", "update", "help"] {
            assert!(help.contains(name), "missing {name} in:\n{help}");
        }
    }

    #[test]
    fn help_lists_global_options() {
        let help = render();
        assert!(help.contains("--directory"), "{help}");
        assert!(help.contains("--dry-run"), "{help}");
        assert!(help.contains("--verbose"), "{help}");
    }

    #[test]
    fn unknown_subcommand_gets_full_usage() {
        let err = Cli::try_parse_from(["no", "frobnicate"]).unwrap_err();
        let usage = usage_after_error(&err).expect("usage for unknown subcommand");
        for name in ["garbage", "home", "rebuild", "update"] {
            assert!(usage.contains(name), "missing {name} in:\n{usage}");
        }
    }

    #[test]
    fn invalid_value_gets_no_extra_usage() {
        let err = Cli::try_parse_from(["no", "rebuild", "-o", "badvalue"]).unwrap_err();
        assert!(usage_after_error(&err).is_none());
    }

    #[test]
    fn help_has_usage_line() {
        assert!(render().contains("Usage: no"));
    }
}
