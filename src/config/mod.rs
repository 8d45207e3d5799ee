//! User settings read from `$XDG_CONFIG_HOME/no/config.toml`.
pub mod toml_loader;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Escalation program used when the settings file does not name one.
pub const DEFAULT_ELEVATE: &str = "sudo";

/// Optional defaults for every command.
///
/// Command-line flags override these; missing keys fall back to values
/// derived from the environment (current directory, host name, user name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory containing `flake.nix`.
    pub directory: Option<PathBuf>,
    /// NixOS configuration used by `rebuild` and `update --rebuild`.
    pub hostname: Option<String>,
    /// Home Manager profile used by `home`.
    pub profile: Option<String>,
    /// Privilege-escalation program; an empty string disables escalation.
    pub elevate: Option<String>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// contains unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }

    /// Load settings from the default location (see [`default_path`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but is invalid.
    pub fn load_default() -> Result<Self, ConfigError> {
        default_path().map_or_else(|| Ok(Self::default()), |path| Self::load(&path))
    }

    /// Escalation program to prefix privileged commands with, if any.
    #[must_use]
    pub fn elevate(&self) -> Option<&str> {
        match self.elevate.as_deref() {
            None => Some(DEFAULT_ELEVATE),
            Some("") => None,
            Some(program) => Some(program),
        }
    }
}

/// Path of the settings file: `$NO_CONFIG`, else
/// `$XDG_CONFIG_HOME/no/config.toml`, else `~/.config/no/config.toml`.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    resolve_path(
        std::env::var_os("NO_CONFIG").map(PathBuf::from),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_path(
    explicit: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    let base = xdg_config_home
        .filter(|p| p.is_absolute())
        .or_else(|| home.map(|h| h.join(".config")))?;
    Some(base.join("no").join("config.toml"))
}
