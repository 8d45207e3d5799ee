//! Subcommand dispatch and the shared plan runner.
pub mod completions;
pub mod garbage;
pub mod help;
pub mod home;
pub mod rebuild;
pub mod update;
pub mod version;

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{Cli, Command};
use crate::context::Context;
use crate::error::ExecError;
use crate::exec::{Executor, Invocation};
use crate::logging::Log;

/// Run the handler for the parsed subcommand.
///
/// `help`, `version` and `completions` only print; every other command
/// builds a [`Context`] first, so an unusable directory fails before any
/// program runs.
///
/// # Errors
///
/// Returns the first error raised while building the context or running the
/// handler.
pub fn dispatch(cli: &Cli, executor: Arc<dyn Executor>, log: Arc<dyn Log>) -> Result<()> {
    let ctx = match &cli.command {
        Command::Help => return help::run(),
        Command::Version => return version::run(),
        Command::Completions(opts) => return completions::run(opts),
        Command::Garbage(_) | Command::Home(_) | Command::Rebuild(_) | Command::Update(_) => {
            Context::from_env(&cli.global, executor, log)?
        }
    };

    match &cli.command {
        Command::Garbage(opts) => garbage::run(opts, &ctx),
        Command::Home(opts) => home::run(opts, &ctx),
        Command::Rebuild(opts) => rebuild::run(opts, &ctx),
        Command::Update(opts) => update::run(opts, &ctx),
        Command::Help | Command::Version | Command::Completions(_) => Ok(()),
    }
}

/// Run a plan of invocations strictly in order inside the context directory.
///
/// Every program is looked up on `PATH` before the first one starts. The
/// first failing step aborts the rest; steps that already ran are not
/// rolled back. A Ctrl-C seen before a step starts stops the plan there. In
/// a dry run the command lines are only logged.
///
/// # Errors
///
/// Returns an error if a program is missing, fails to start, exits non-zero,
/// or is interrupted.
pub fn execute_plan(ctx: &Context, plan: &[Invocation]) -> Result<()> {
    if ctx.dry_run {
        for invocation in plan {
            ctx.log.dry_run(&invocation.to_string());
        }
        return Ok(());
    }

    preflight(ctx, plan)?;

    for invocation in plan {
        let command = invocation.to_string();
        if ctx.executor.interrupted() {
            return Err(ExecError::Interrupted { command }.into());
        }
        ctx.log.command(&command);
        ctx.executor.run(&ctx.directory, invocation)?;
    }
    Ok(())
}

fn preflight(ctx: &Context, plan: &[Invocation]) -> Result<(), ExecError> {
    let mut checked = BTreeSet::new();
    for program in plan.iter().flat_map(Invocation::required_programs) {
        if checked.insert(program) {
            if !ctx.executor.which(program) {
                return Err(ExecError::NotFound {
                    program: program.to_string(),
                });
            }
            ctx.log.debug(&format!("found {program}"));
        }
    }
    Ok(())
}

/// Flake reference for `name` in the context directory.
#[must_use]
pub fn flake_ref(name: &str) -> String {
    format!(".#{name}")
}
