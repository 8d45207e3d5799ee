//! External program invocations and the executor that runs them.
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::ExecError;
use crate::interrupt;

/// One external program call: the program and its ordered arguments.
///
/// An invocation may be wrapped in a privilege-escalation program (`sudo`,
/// `doas`, …); [`argv`](Self::argv) yields the full command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    elevate_with: Option<String>,
}

impl Invocation {
    /// Start an invocation of `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            elevate_with: None,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run through `elevate_with` (e.g. `sudo`); `None` leaves it unwrapped.
    #[must_use]
    pub fn elevated(mut self, elevate_with: Option<&str>) -> Self {
        self.elevate_with = elevate_with.map(String::from);
        self
    }

    /// The wrapped program (without the escalation prefix).
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the wrapped program.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The escalation program, if any.
    #[must_use]
    pub fn elevate_with(&self) -> Option<&str> {
        self.elevate_with.as_deref()
    }

    /// Programs that must be on `PATH` for this invocation to start.
    pub fn required_programs(&self) -> impl Iterator<Item = &str> {
        self.elevate_with
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.program.as_str()))
    }

    /// Full command line, escalation prefix first.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        self.required_programs()
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Runs invocations. Abstracted so command handlers can be tested without
/// spawning processes.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `invocation` in `dir` with stdin, stdout and stderr inherited,
    /// blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started, exits non-zero, or
    /// was interrupted with Ctrl-C.
    fn run(&self, dir: &Path, invocation: &Invocation) -> Result<(), ExecError>;

    /// Check if a program is available on `PATH`.
    fn which(&self, program: &str) -> bool;

    /// Return whether Ctrl-C was pressed since the last check, clearing it.
    fn interrupted(&self) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, dir: &Path, invocation: &Invocation) -> Result<(), ExecError> {
        let command = invocation.to_string();
        let argv = invocation.argv();
        let (program, args) = argv.split_first().ok_or_else(|| ExecError::Spawn {
            command: command.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command line"),
        })?;

        // Children share our process group, so Ctrl-C reaches them directly.
        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ExecError::Spawn {
                command: command.clone(),
                source,
            })?;

        if self.interrupted() {
            return Err(ExecError::Interrupted { command });
        }
        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Failed {
                command,
                code: status.code(),
            })
        }
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn interrupted(&self) -> bool {
        interrupt::take()
    }
}
