//! Explicit execution context handed to every command handler.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::error::ContextError;
use crate::exec::Executor;
use crate::logging::Log;

/// Host and user names of the machine `no` runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Host name, the default NixOS configuration name.
    pub hostname: String,
    /// Login name of the invoking user.
    pub username: String,
}

impl Identity {
    /// Detect the current host and user.
    ///
    /// # Errors
    ///
    /// Returns an error if the host name cannot be read.
    pub fn detect() -> Result<Self, ContextError> {
        let hostname =
            whoami::fallible::hostname().map_err(|e| ContextError::Hostname(e.to_string()))?;
        Ok(Self {
            hostname,
            username: whoami::username(),
        })
    }
}

/// Everything a command handler needs, passed explicitly instead of living
/// in process-wide state.
pub struct Context {
    /// Canonical directory containing `flake.nix`; every child runs here.
    pub directory: PathBuf,
    /// Host and user names of this machine.
    pub identity: Identity,
    /// Defaults from the settings file.
    pub settings: Settings,
    /// Print command lines instead of running them.
    pub dry_run: bool,
    /// Runs external programs.
    pub executor: Arc<dyn Executor>,
    /// Console and file logger.
    pub log: Arc<dyn Log>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("directory", &self.directory)
            .field("identity", &self.identity)
            .field("settings", &self.settings)
            .field("dry_run", &self.dry_run)
            .field("executor", &"<dyn Executor>")
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl Context {
    /// Build a context from explicit parts.
    ///
    /// The directory is taken from `--directory`, then the settings file, then
    /// the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist or is not a directory.
    pub fn new(
        global: &GlobalOpts,
        settings: Settings,
        identity: Identity,
        executor: Arc<dyn Executor>,
        log: Arc<dyn Log>,
    ) -> Result<Self, ContextError> {
        let requested = global
            .directory
            .clone()
            .or_else(|| settings.directory.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let directory = resolve_directory(&requested)?;

        Ok(Self {
            directory,
            identity,
            settings,
            dry_run: global.dry_run,
            executor,
            log,
        })
    }

    /// Build a context from the settings file and the running machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file is invalid, the host name cannot
    /// be read, or the directory is unusable.
    pub fn from_env(
        global: &GlobalOpts,
        executor: Arc<dyn Executor>,
        log: Arc<dyn Log>,
    ) -> Result<Self> {
        let settings = Settings::load_default()?;
        let identity = Identity::detect()?;
        let ctx = Self::new(global, settings, identity, executor, log)
            .context("invalid target directory")?;
        ctx.log
            .debug(&format!("working in {}", ctx.directory.display()));
        Ok(ctx)
    }

    /// NixOS configuration name used when none is given on the command line.
    #[must_use]
    pub fn hostname(&self) -> &str {
        self.settings
            .hostname
            .as_deref()
            .unwrap_or(&self.identity.hostname)
    }

    /// Home Manager profile used when none is given: `<user>@<hostname>`.
    #[must_use]
    pub fn default_profile(&self) -> String {
        self.settings.profile.clone().unwrap_or_else(|| {
            format!("{}@{}", self.identity.username, self.hostname())
        })
    }

    /// Escalation program for privileged commands.
    #[must_use]
    pub fn elevate(&self) -> Option<&str> {
        self.settings.elevate()
    }
}

fn resolve_directory(path: &Path) -> Result<PathBuf, ContextError> {
    match std::fs::metadata(path) {
        Err(_) => Err(ContextError::DirectoryNotFound(path.to_path_buf())),
        Ok(meta) if !meta.is_dir() => Err(ContextError::NotADirectory(path.to_path_buf())),
        Ok(_) => dunce::canonicalize(path)
            .map_err(|_| ContextError::DirectoryNotFound(path.to_path_buf())),
    }
}
