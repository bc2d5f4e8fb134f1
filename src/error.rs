//! Domain-specific error types for the site builder.
//!
//! Library modules return typed errors built with [`thiserror`]; command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] through the
//! standard `?` operator. The template engine has no error type: rendering
//! never fails.
//!
//! # Error hierarchy
//!
//! ```text
//! SiteError
//! ├── Config(ConfigError)  site.toml reading, parsing, validation
//! └── Build(BuildError)    output I/O, strict-mode diagnostics
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the site builder.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Configuration-related error (reading, parsing or validating `site.toml`).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Build error (writing output, strict-mode template diagnostics).
    #[error("Build error: {0}")]
    Build(#[from] BuildError),
}

/// Errors that arise from loading `site.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },

    /// A key holds a value that is not allowed.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Name of the offending key.
        key: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// Errors that arise while producing the site.
#[derive(Error, Debug)]
pub enum BuildError {
    /// An I/O error on a specific path.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Strict mode is on and rendering produced diagnostics.
    #[error("{count} template diagnostic(s) in {page}")]
    Diagnostics {
        /// Page or template the diagnostics were reported for.
        page: String,
        /// Number of diagnostics.
        count: usize,
    },
}

impl BuildError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
