//! Error types for roster loading, writing, and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing roster CSV files.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster exists but could not be read.
    #[error("failed to read roster {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The roster was read but a row could not be parsed.
    #[error("failed to parse roster {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The run configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A course file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors raised while loading a [`RosterConfig`](crate::config::RosterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The output file template must contain exactly one `{}` placeholder.
    #[error("file template '{template}' must contain exactly one '{{}}' placeholder")]
    InvalidTemplate { template: String },
}
