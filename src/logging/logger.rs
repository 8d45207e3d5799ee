//! Console logger backed by `tracing` events.
use std::path::PathBuf;

use super::types::Log;
use super::utils::log_file_path;

/// Implement [`Log`] by delegating to inherent methods of the same name.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger for `no` commands.
///
/// Every message becomes a `tracing` event. The subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders it on the
/// console and mirrors it to `$XDG_CACHE_HOME/no/<command>.log`.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// `None` means the command does not keep a log file.
    #[must_use]
    pub fn new(command: Option<&str>) -> Self {
        Self {
            log_file: command.and_then(log_file_path),
        }
    }

    /// Return the log file path, if any.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "no::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Echo a command line before it runs.
    pub fn command(&self, msg: &str) {
        tracing::info!(target: "no::command", "{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a command line skipped by a dry run.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "no::dry_run", "{msg}");
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, command, debug, warn, error, dry_run);
}
