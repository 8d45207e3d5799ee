//! `rebuild`: rebuild a NixOS configuration from the flake.
use anyhow::Result;

use super::{execute_plan, flake_ref};
use crate::cli::{RebuildOpts, RebuildOperation};
use crate::context::Context;
use crate::exec::Invocation;

/// Build the `nixos-rebuild` invocation for `operation` on configuration `config`.
///
/// Operations that activate or register a system configuration run through
/// the escalation program; pure builds do not.
#[must_use]
pub fn invocation(ctx: &Context, operation: RebuildOperation, config: &str) -> Invocation {
    let elevate = if operation.requires_root() {
        ctx.elevate()
    } else {
        None
    };
    Invocation::new("nixos-rebuild")
        .arg(operation.as_str())
        .args(["--flake".to_string(), flake_ref(config)])
        .elevated(elevate)
}

/// Run the rebuild command.
///
/// # Errors
///
/// Returns an error if `nixos-rebuild` is missing or fails.
pub fn run(opts: &RebuildOpts, ctx: &Context) -> Result<()> {
    let config = opts.config.as_deref().unwrap_or_else(|| ctx.hostname());
    ctx.log.stage(&format!(
        "Rebuilding NixOS configuration '{config}' ({})",
        opts.operation
    ));
    execute_plan(ctx, &[invocation(ctx, opts.operation, config)])
}
