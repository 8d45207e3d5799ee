//! `update`: update `flake.lock`, optionally rebuilding for the next boot.
use anyhow::Result;

use super::{execute_plan, rebuild};
use crate::cli::{RebuildOperation, UpdateOpts};
use crate::context::Context;
use crate::exec::Invocation;

/// Build the update plan.
///
/// All requested inputs go to a single `nix flake update`; no inputs means
/// every input is updated. With `--rebuild`, a `boot` rebuild of the host
/// configuration follows.
#[must_use]
pub fn plan(opts: &UpdateOpts, ctx: &Context) -> Vec<Invocation> {
    let mut plan = vec![
        Invocation::new("nix")
            .args(["flake", "update"])
            .args(opts.inputs.iter().cloned()),
    ];
    if opts.rebuild {
        plan.push(rebuild::invocation(
            ctx,
            RebuildOperation::Boot,
            ctx.hostname(),
        ));
    }
    plan
}

/// Run the update command.
///
/// # Errors
///
/// Returns an error if either step fails; a failed update never rebuilds.
pub fn run(opts: &UpdateOpts, ctx: &Context) -> Result<()> {
    if opts.inputs.is_empty() {
        ctx.log
            .stage(&format!("Updating flake in {}", ctx.directory.display()));
    } else {
        ctx.log.stage(&format!(
            "Updating {} in {}",
            opts.inputs.join(", "),
            ctx.directory.display()
        ));
    }
    execute_plan(ctx, &plan(opts, ctx))
}
