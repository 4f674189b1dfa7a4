// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{GlobwatchError, Result};
use crate::pattern::Pattern;
use crate::watch::WatcherOptions;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::GlobwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let watch = raw.watch;

        let pattern = Pattern::new(&watch.pattern)?;
        let interval = parse_duration(&watch.interval).map_err(|e| {
            GlobwatchError::ConfigError(format!("[watch].interval: {e}"))
        })?;
        if interval.is_zero() {
            return Err(GlobwatchError::ConfigError(
                "[watch].interval must be greater than zero".to_string(),
            ));
        }

        validate_buffer("event_buffer", watch.event_buffer)?;
        validate_buffer("error_buffer", watch.error_buffer)?;

        Ok(ConfigFile::new_unchecked(
            pattern,
            interval,
            WatcherOptions {
                event_buffer: watch.event_buffer,
                error_buffer: watch.error_buffer,
            },
        ))
    }
}

fn validate_buffer(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(GlobwatchError::ConfigError(format!(
            "[watch].{name} must be >= 1 (got 0)"
        )));
    }
    Ok(())
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    let secs = |factor: u64| {
        value
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration '{}' is too large", s))
    };

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => secs(60),
        "h" => secs(60 * 60),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}
