//! TOML configuration file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Deserialize a value of type `T` from TOML text.
///
/// `origin` names where the text came from and is only used in errors.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the text is not valid TOML or does not
/// match the shape of `T`.
pub fn parse_config<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Load and deserialize a TOML config file.
///
/// A missing file is not an error: it deserializes from empty TOML, so every
/// field takes its serde default.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return parse_config("", &path.display().to_string());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content, &path.display().to_string())
}
