// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::pattern::Pattern;
use crate::watch::{DEFAULT_BUFFER, WatcherOptions};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// pattern = "src/**/*.rs"
/// interval = "500ms"
/// event_buffer = 64
/// error_buffer = 16
/// ```
///
/// All keys are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Pattern of files to watch, relative to the watched directory.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Poll interval, e.g. `"1s"` or `"250ms"`.
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Capacity of the event channel.
    #[serde(default = "default_buffer")]
    pub event_buffer: usize,

    /// Capacity of the error channel.
    #[serde(default = "default_buffer")]
    pub error_buffer: usize,
}

fn default_pattern() -> String {
    "**/*".to_string()
}

fn default_interval() -> String {
    "1s".to_string()
}

fn default_buffer() -> usize {
    DEFAULT_BUFFER
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            interval: default_interval(),
            event_buffer: default_buffer(),
            error_buffer: default_buffer(),
        }
    }
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pattern: Pattern,
    interval: Duration,
    options: WatcherOptions,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        pattern: Pattern,
        interval: Duration,
        options: WatcherOptions,
    ) -> Self {
        Self {
            pattern,
            interval,
            options,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn options(&self) -> WatcherOptions {
        self.options
    }
}
