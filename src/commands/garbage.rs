//! `garbage`: collect unreachable store paths and prune old generations.
use anyhow::Result;

use super::execute_plan;
use crate::cli::GarbageOpts;
use crate::context::Context;
use crate::exec::Invocation;

/// Profile whose history is pruned.
pub const SYSTEM_PROFILE: &str = "/nix/var/nix/profiles/system";

/// Generations younger than this survive the default prune.
pub const HISTORY_RETENTION: &str = "7d";

/// Activation script of the running system.
pub const SWITCH_TO_CONFIGURATION: &str = "/run/current-system/bin/switch-to-configuration";

/// Shown before `--burn` runs anything.
pub const BURN_WARNING: &str = "burn mode: every previous generation will be removed from the \
     boot menu; you will not be able to boot into them again";

/// Build the garbage plan.
///
/// The same two collections run first in both modes, system scope then user
/// scope. The default third step prunes system history older than
/// [`HISTORY_RETENTION`]; `--burn` replaces it with a boot menu rewrite.
#[must_use]
pub fn plan(opts: &GarbageOpts, ctx: &Context) -> Vec<Invocation> {
    let collect = || Invocation::new("nix-collect-garbage");

    let last = if opts.burn {
        Invocation::new(SWITCH_TO_CONFIGURATION).arg("boot")
    } else {
        Invocation::new("nix").args([
            "profile",
            "wipe-history",
            "--profile",
            SYSTEM_PROFILE,
            "--older-than",
            HISTORY_RETENTION,
        ])
    };

    vec![
        collect().elevated(ctx.elevate()),
        collect(),
        last.elevated(ctx.elevate()),
    ]
}

/// Run the garbage command.
///
/// # Errors
///
/// Returns an error if any step fails; later steps are skipped.
pub fn run(opts: &GarbageOpts, ctx: &Context) -> Result<()> {
    if opts.burn {
        ctx.log.warn(BURN_WARNING);
        ctx.log.stage("Burning old generations");
    } else {
        ctx.log.stage(&format!(
            "Collecting garbage (keeping {HISTORY_RETENTION} of system history)"
        ));
    }
    execute_plan(ctx, &plan(opts, ctx))
}
