//! Logger configuration: enable flag, thread-info toggle and default tag.
pub mod toml_loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Tag used when a call does not pass one and none was configured.
pub const DEFAULT_TAG: &str = "Logger";

/// Settings consulted by every log call.
///
/// Each field can be overwritten at runtime through the setters on
/// [`Logger`](crate::logging::Logger); there is no validation, so an empty
/// tag is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// When `false`, log calls emit nothing at all.
    pub enabled: bool,
    /// Include the `Thread: <name>` block in each frame.
    pub include_thread_info: bool,
    /// Tag used by the tag-less entry points.
    #[serde(rename = "tag")]
    pub default_tag: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            include_thread_info: true,
            default_tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml_loader::parse_config(text, "<string>")
    }

    /// Load a configuration file, falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml_loader::load_config(path)?;
        tracing::debug!(
            target: "framelog::internal",
            path = %path.display(),
            enabled = config.enabled,
            thread_info = config.include_thread_info,
            "loaded logger config"
        );
        Ok(config)
    }
}
