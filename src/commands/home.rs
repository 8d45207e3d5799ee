//! `home`: rebuild a Home Manager configuration from the flake.
use anyhow::Result;

use super::{execute_plan, flake_ref};
use crate::cli::{HomeOperation, HomeOpts};
use crate::context::Context;
use crate::exec::Invocation;

/// Build the `home-manager` invocation. Home Manager runs as the user, so it
/// is never elevated.
#[must_use]
pub fn invocation(operation: HomeOperation, profile: &str) -> Invocation {
    Invocation::new("home-manager")
        .arg(operation.as_str())
        .args(["--flake".to_string(), flake_ref(profile)])
}

/// Run the home command.
///
/// # Errors
///
/// Returns an error if `home-manager` is missing or fails.
pub fn run(opts: &HomeOpts, ctx: &Context) -> Result<()> {
    let profile = opts
        .profile
        .clone()
        .unwrap_or_else(|| ctx.default_profile());
    ctx.log.stage(&format!(
        "Rebuilding Home Manager profile '{profile}' ({})",
        opts.operation
    ));
    execute_plan(ctx, &[invocation(opts.operation, &profile)])
}
