// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** validate the
/// pattern or interval. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Raw config for a run: the explicit `path` if given, otherwise
/// [`default_config_path`] when it exists, otherwise built-in defaults.
pub fn load_raw_or_default(path: Option<&Path>) -> Result<RawConfigFile> {
    match path {
        Some(path) => load_from_path(path),
        None => {
            let fallback = default_config_path();
            if fallback.is_file() {
                load_from_path(fallback)
            } else {
                Ok(RawConfigFile::default())
            }
        }
    }
}

/// `Globwatch.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Globwatch.toml")
}
