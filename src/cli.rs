// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `globwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "globwatch",
    version,
    about = "Watch a directory for changes to files matching a glob pattern.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to watch.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Pattern of files to watch, relative to DIR.
    ///
    /// Overrides `[watch].pattern` from the config file. Default: `**/*`.
    #[arg(long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Interval between checks for changes (e.g. `1s`, `250ms`).
    ///
    /// Overrides `[watch].interval` from the config file. Default: `1s`.
    #[arg(long, value_name = "DURATION")]
    pub interval: Option<String>,

    /// Path to a config file (TOML).
    ///
    /// Default: `Globwatch.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GLOBWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate the configuration, print the currently matching files, and
    /// exit without watching.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_directory() {
        let args = CliArgs::try_parse_from([
            "globwatch",
            "--pattern",
            "**/*_test.go",
            "--interval",
            "250ms",
            "src",
        ])
        .unwrap();

        assert_eq!(args.dir, PathBuf::from("src"));
        assert_eq!(args.pattern.as_deref(), Some("**/*_test.go"));
        assert_eq!(args.interval.as_deref(), Some("250ms"));
        assert!(args.config.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn directory_is_required() {
        assert!(CliArgs::try_parse_from(["globwatch"]).is_err());
    }
}
