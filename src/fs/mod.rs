// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod mock;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Path relative to the file system root (the listed directory joined
    /// with the entry name).
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Abstract filesystem interface.
///
/// All paths are relative to the file system's own root; `""` and `"."`
/// both name the root itself. Implementations are shared between the
/// caller and a running watcher, hence `Send + Sync`.
pub trait FileSystem: Send + Sync + Debug {
    /// List the entries of a single directory, in a stable order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Last modification time of `path`.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;
}

/// Implementation that uses `std::fs` below a fixed root directory.
#[derive(Debug, Clone)]
pub struct RealFileSystem {
    root: PathBuf,
}

impl RealFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileSystem for RealFileSystem {
    /// Entries come back sorted by file name so walks are deterministic.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            // Symlinks are reported as files and never descended into.
            let is_dir = entry.file_type()?.is_dir();
            entries.push((entry.file_name(), is_dir));
        }
        entries.sort();

        Ok(entries
            .into_iter()
            .map(|(name, is_dir)| DirEntry {
                path: path.join(name),
                is_dir,
            })
            .collect())
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(self.resolve(path))?.modified()
    }
}
