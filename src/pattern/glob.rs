// src/pattern/glob.rs

//! Recursive enumeration of the files under a root that match a pattern.

use std::path::{Component, Path, PathBuf};

use tracing::{trace, warn};

use crate::errors::{GlobwatchError, Result};
use crate::fs::FileSystem;
use crate::watch::path_utils::{relative_str, to_slash};

use super::Pattern;

/// Walk `root` depth first and return every regular file whose path
/// (relative to `root`, `/`-separated) matches `pattern`.
///
/// Directories are always descended, never matched. Results follow the
/// walk, which follows the order `fs` lists entries in. The first listing
/// failure aborts the walk. Names that are not valid UTF-8 cannot be matched
/// and are skipped.
pub fn enumerate(
    fs: &dyn FileSystem,
    pattern: &Pattern,
    root: impl AsRef<Path>,
) -> Result<Vec<String>> {
    let root: PathBuf = root
        .as_ref()
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let mut found = Vec::new();
    walk(fs, pattern, &root, &root, &mut found)?;
    Ok(found)
}

fn walk(
    fs: &dyn FileSystem,
    pattern: &Pattern,
    root: &Path,
    dir: &Path,
    found: &mut Vec<String>,
) -> Result<()> {
    let entries = fs.read_dir(dir).map_err(|source| GlobwatchError::Walk {
        path: to_slash(dir),
        source,
    })?;

    for entry in entries {
        if entry.is_dir {
            walk(fs, pattern, root, &entry.path, found)?;
            continue;
        }

        let Some(rel) = relative_str(root, &entry.path) else {
            warn!(path = %to_slash(&entry.path), "skipping file name that is not valid UTF-8");
            continue;
        };
        if pattern.matches(&rel) {
            trace!(path = %rel, pattern = %pattern, "matched");
            found.push(rel);
        }
    }

    Ok(())
}

impl Pattern {
    /// [`enumerate`] with this pattern.
    pub fn glob(&self, fs: &dyn FileSystem, root: impl AsRef<Path>) -> Result<Vec<String>> {
        enumerate(fs, self, root)
    }
}
