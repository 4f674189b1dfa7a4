// src/logging.rs

//! Logging setup for `globwatch` using `tracing` + `tracing-subscriber`.
//!
//! Filter precedence:
//! 1. `--log-level` CLI flag, applied to every target
//! 2. `GLOBWATCH_LOG`, an `EnvFilter` directive list such as
//!    `globwatch::watch=debug,warn`
//! 3. `info`
//!
//! Logs go to stderr; stdout carries nothing but change events.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "GLOBWATCH_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Initialise global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing the log subscriber: {e}"))?;

    Ok(())
}

fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    let directives = match (cli_level, env) {
        (Some(level), _) => level_directive(level),
        (None, Some(env)) if !env.trim().is_empty() => env.trim(),
        (None, _) => DEFAULT_DIRECTIVES,
    };

    EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log filter {directives:?}"))
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
