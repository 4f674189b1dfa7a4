// src/config/mod.rs

//! Configuration loading and validation for globwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate pattern, interval and buffer sizes (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_raw_or_default};
pub use model::{ConfigFile, RawConfigFile, WatchSection};
pub use validate::parse_duration;
