//! Domain-specific error types for the `no` helper.
//!
//! Internal modules return typed errors built with [`thiserror`] while
//! command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ExecError: preflight lookup, spawn, and exit-status failures
//! ConfigError: settings file reading and parsing
//! ContextError: target directory and host identity resolution
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while running an external program.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program is not available on `PATH`.
    #[error("required program '{program}' not found on PATH")]
    NotFound {
        /// Name of the missing program.
        program: String,
    },

    /// The operating system refused to start the program.
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("`{command}` failed (exit {})", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    Failed {
        /// Rendered command line.
        command: String,
        /// Exit code, or `None` when the child was killed by a signal.
        code: Option<i32>,
    },

    /// The user pressed Ctrl-C while the program ran or before it started.
    #[error("interrupted at `{command}`")]
    Interrupted {
        /// Rendered command line.
        command: String,
    },
}

/// Errors that arise from loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        /// Path to the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or contains unknown keys.
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        /// Path to the settings file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Errors that arise while building the execution context.
#[derive(Error, Debug)]
pub enum ContextError {
    /// The target directory does not exist.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The target path exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The host name of this machine could not be determined.
    #[error("could not determine host name: {0}")]
    Hostname(String),
}
