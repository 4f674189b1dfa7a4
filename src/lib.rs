// src/lib.rs

//! Polling file system watcher driven by an extended glob pattern language.
//!
//! - [`pattern`]: compile patterns such as `**/*_test.go` and match paths.
//! - [`fs`]: the two file system capabilities the watcher needs.
//! - [`watch`]: snapshot, diff and publish created/modified/deleted events.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod pattern;
pub mod types;
pub mod watch;

pub use errors::{GlobwatchError, Result};
pub use pattern::{Pattern, PatternError, compile, enumerate, matches};
pub use types::{Event, EventType};
pub use watch::{Watcher, WatcherOptions};

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, RawConfigFile, load_raw_or_default};
use crate::fs::{FileSystem, RealFileSystem};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the watcher over the real file system
/// - printing events to stdout and errors to stderr
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let raw = load_raw_or_default(args.config.as_deref())?;
    let cfg = ConfigFile::try_from(apply_overrides(raw, &args))?;

    let root = std::path::absolute(&args.dir)
        .with_context(|| format!("resolving directory {:?}", args.dir))?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new(&root));

    if args.dry_run {
        print_dry_run(&cfg, fs.as_ref())?;
        return Ok(());
    }

    let mut watcher = Watcher::from_pattern(
        fs,
        cfg.pattern().clone(),
        cfg.interval(),
        cfg.options(),
    )?;
    let mut events = watcher
        .take_events()
        .context("event receiver already taken")?;
    let mut errors = watcher
        .take_errors()
        .context("error receiver already taken")?;

    // Ctrl-C → graceful shutdown.
    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(tokio::signal::ctrl_c(), shutdown.clone()));

    watcher
        .start_with_cancellation(shutdown.clone())
        .await
        .context("unable to start watcher")?;
    info!(root = ?root, pattern = %cfg.pattern(), "watching");

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("{event}");
        }
    });
    let reporter = tokio::spawn(async move {
        while let Some(err) = errors.recv().await {
            eprintln!("globwatch: failed to detect changes: {err}");
        }
    });

    shutdown.cancelled().await;
    info!("shutdown requested");

    watcher.close().await?;
    printer.await?;
    reporter.await?;

    debug!("all channels drained");
    Ok(())
}

/// Cancel `token` once `signal` resolves. A signal that cannot be listened
/// for cancels straight away.
async fn cancel_on_signal<F>(signal: F, token: CancellationToken)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "failed to listen for Ctrl+C; shutting down");
    }
    token.cancel();
}

/// CLI flags win over the config file.
fn apply_overrides(mut raw: RawConfigFile, args: &CliArgs) -> RawConfigFile {
    if let Some(pattern) = &args.pattern {
        raw.watch.pattern = pattern.clone();
    }
    if let Some(interval) = &args.interval {
        raw.watch.interval = interval.clone();
    }
    raw
}

/// Simple dry-run output: print the effective settings and current matches.
fn print_dry_run(cfg: &ConfigFile, fs: &dyn FileSystem) -> anyhow::Result<()> {
    println!("globwatch dry-run");
    println!("  watch.pattern = {}", cfg.pattern());
    println!("  watch.interval = {:?}", cfg.interval());
    println!("  watch.event_buffer = {}", cfg.options().event_buffer);
    println!("  watch.error_buffer = {}", cfg.options().error_buffer);
    println!();

    let files = cfg.pattern().glob(fs, "")?;
    println!("matching files ({}):", files.len());
    for file in files {
        println!("  - {file}");
    }

    debug!("dry-run complete (not watching)");
    Ok(())
}
