//! Error types for harvesting runs.

use std::path::PathBuf;

/// Harvest errors.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// Input file missing or unreadable.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file could not be decoded as delimited rows.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Plain filesystem error outside the csv layer.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed.
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Config values are inconsistent.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A pool worker panicked or was cancelled.
    #[error("worker failed: {message}")]
    Worker { message: String },
}

impl HarvestError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::ConfigParse { .. } => 2,
            Self::Open { .. }
            | Self::Parse { .. }
            | Self::Write { .. }
            | Self::Io { .. }
            | Self::Worker { .. } => 3,
        }
    }

    /// Path the error relates to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Open { path, .. }
            | Self::Parse { path, .. }
            | Self::Write { path, .. }
            | Self::Io { path, .. }
            | Self::ConfigParse { path, .. } => Some(path),
            Self::Config { .. } | Self::Worker { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
