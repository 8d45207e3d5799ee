//! TOML file loading.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load and deserialize a TOML file.
///
/// A missing file deserializes from empty TOML, so every optional key takes
/// its default.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
