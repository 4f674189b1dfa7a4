// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Taking snapshots of the files matching a pattern (`scan`).
//! - Diffing successive snapshots into created/modified/deleted events
//!   (`state`, a pure core with no IO).
//! - Driving snapshots on a fixed interval and publishing the results on
//!   bounded channels (`watcher`).
//!
//! Only modification times are compared; file contents are never read and
//! no OS change-notification API is involved.

pub mod path_utils;
pub mod scan;
pub mod state;
pub mod watcher;

pub use scan::{Scan, ScannedFile, scan};
pub use state::{TickReport, WatchState};
pub use watcher::{DEFAULT_BUFFER, Watcher, WatcherOptions};
