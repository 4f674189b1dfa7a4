// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

pub use crate::pattern::{PatternError, PatternErrorKind};

#[derive(Error, Debug)]
pub enum GlobwatchError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("failed to walk {path:?}: {source}")]
    Walk {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to stat {path:?}: {source}")]
    Stat {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("watcher has already been started")]
    AlreadyStarted,

    #[error("watcher has been closed")]
    WatcherClosed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GlobwatchError>;
