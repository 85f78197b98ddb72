//! Error types for framelog setup operations.
//!
//! Log calls themselves never fail: every entry point on
//! [`Logger`](crate::logging::Logger) returns `()`. The types here cover the
//! fallible edges around it, such as loading a TOML configuration or a
//! bundled sink failing to write. The binary converts them to
//! [`anyhow::Error`] at the CLI boundary via `?`.
//!
//! # Error types
//!
//! ```text
//! ConfigError: reading or parsing a TOML config
//! SinkError:   a bundled sink could not write a line
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading a logger configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML or has unexpected keys.
    #[error("Invalid TOML in {origin}: {source}")]
    Parse {
        /// Where the text came from (a path, or `<string>`).
        origin: String,
        /// Underlying deserialization error.
        source: toml::de::Error,
    },
}

/// Errors that arise when a sink writes a line.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The underlying writer rejected the line.
    #[error("failed to write line for tag '{tag}': {source}")]
    Write {
        /// Tag of the line being written.
        tag: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: PathBuf::from("/etc/framelog.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/etc/framelog.toml"));
        assert!(e.to_string().contains("IO error reading config file"));
    }

    #[test]
    fn config_error_parse_has_source() {
        use std::error::Error as StdError;
        let source = toml::from_str::<toml::Table>("enabled = = true").unwrap_err();
        let e = ConfigError::Parse {
            origin: "<string>".to_string(),
            source,
        };
        assert!(e.to_string().starts_with("Invalid TOML in <string>"));
        assert!(e.source().is_some());
    }

    #[test]
    fn sink_error_write_display() {
        let e = SinkError::Write {
            tag: "Net".to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "closed"),
        };
        assert_eq!(e.to_string(), "failed to write line for tag 'Net': closed");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<SinkError>();
    }

    #[test]
    fn config_error_converts_to_anyhow() {
        let e = ConfigError::Io {
            path: PathBuf::from("x"),
            source: io::Error::other("x"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }

    #[test]
    fn sink_error_converts_to_anyhow() {
        let e = SinkError::Write {
            tag: "T".to_string(),
            source: io::Error::other("boom"),
        };
        let err: anyhow::Error = e.into();
        assert!(err.to_string().contains("'T'"));
    }
}
