// src/fs/mock.rs

//! In-memory [`FileSystem`] for tests.
//!
//! Modification times come from a logical clock that advances by one second
//! on every mutation, so a `touch` is always strictly later than anything
//! recorded before it. Directory children keep insertion order.

use super::{DirEntry, FileSystem};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File {
        modified: SystemTime,
    },
    Dir {
        modified: SystemTime,
        children: Vec<String>, // List of child names
    },
}

impl MockEntry {
    fn modified(&self) -> SystemTime {
        match self {
            MockEntry::File { modified } | MockEntry::Dir { modified, .. } => *modified,
        }
    }

    fn set_modified(&mut self, at: SystemTime) {
        match self {
            MockEntry::File { modified } | MockEntry::Dir { modified, .. } => *modified = at,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    clock: u64,
    stat_failures: HashSet<PathBuf>,
    read_dir_failures: HashSet<PathBuf>,
}

impl MockState {
    fn now(&mut self) -> SystemTime {
        self.clock += 1;
        UNIX_EPOCH + Duration::from_secs(self.clock)
    }

    fn ensure_dir(&mut self, path: &Path) {
        if self.entries.contains_key(path) {
            return;
        }
        let modified = self.now();
        self.entries.insert(
            path.to_path_buf(),
            MockEntry::Dir {
                modified,
                children: Vec::new(),
            },
        );
        self.link(path);
    }

    /// Register `path` with its parent, creating missing parents on the way.
    fn link(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        let name = name.to_string_lossy().into_owned();

        self.ensure_dir(parent);
        if let Some(MockEntry::Dir { children, .. }) = self.entries.get_mut(parent) {
            if !children.contains(&name) {
                children.push(name);
            }
        }
    }

    fn unlink(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        let name = name.to_string_lossy().into_owned();
        if let Some(MockEntry::Dir { children, .. }) = self.entries.get_mut(parent) {
            children.retain(|child| *child != name);
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut state = MockState::default();
        // Ensure root exists
        state.ensure_dir(Path::new(""));

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Create an empty file (and any missing parent directories). An existing
    /// file gets a fresh modification time.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        self.touch(path);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = key(path.as_ref());
        self.lock().ensure_dir(&path);
    }

    /// Create `path` as a file or bump its modification time.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let path = key(path.as_ref());
        let mut state = self.lock();
        let modified = state.now();

        if let Some(entry) = state.entries.get_mut(&path) {
            entry.set_modified(modified);
            return;
        }
        state
            .entries
            .insert(path.clone(), MockEntry::File { modified });
        state.link(&path);
    }

    /// Overwrite the modification time of an existing entry.
    pub fn set_modified(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let path = key(path.as_ref());
        if let Some(entry) = self.lock().entries.get_mut(&path) {
            entry.set_modified(modified);
        }
    }

    /// Remove `path` and everything below it. Returns false if nothing was
    /// there.
    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        let path = key(path.as_ref());
        let mut state = self.lock();

        let doomed: Vec<PathBuf> = state
            .entries
            .keys()
            .filter(|k| k.starts_with(&path))
            .cloned()
            .collect();
        if doomed.is_empty() {
            return false;
        }

        for k in &doomed {
            state.entries.remove(k);
        }
        state.unlink(&path);
        state.ensure_dir(Path::new(""));
        true
    }

    /// Make every `modified` call for `path` fail until cleared.
    pub fn fail_stat(&self, path: impl AsRef<Path>) {
        self.lock().stat_failures.insert(key(path.as_ref()));
    }

    /// Make every `read_dir` call for `path` fail until cleared.
    pub fn fail_read_dir(&self, path: impl AsRef<Path>) {
        self.lock().read_dir_failures.insert(key(path.as_ref()));
    }

    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.stat_failures.clear();
        state.read_dir_failures.clear();
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.lock().entries.contains_key(&key(path.as_ref()))
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FileSystem for MockFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let state = self.lock();
        let dir = key(path);

        if state.read_dir_failures.contains(&dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read_dir denied: {:?}", path),
            ));
        }

        match state.entries.get(&dir) {
            Some(MockEntry::Dir { children, .. }) => Ok(children
                .iter()
                .map(|name| DirEntry {
                    path: path.join(name),
                    is_dir: matches!(
                        state.entries.get(&dir.join(name)),
                        Some(MockEntry::Dir { .. })
                    ),
                })
                .collect()),
            Some(MockEntry::File { .. }) => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("Not a directory: {:?}", path),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {:?}", path),
            )),
        }
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        let state = self.lock();
        let path_key = key(path);

        if state.stat_failures.contains(&path_key) {
            return Err(io::Error::other(format!("stat failed: {:?}", path)));
        }

        state
            .entries
            .get(&path_key)
            .map(MockEntry::modified)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("File not found: {:?}", path))
            })
    }
}

/// Normalise a path into a map key: `./a/b` and `a/b` are the same entry and
/// the root is the empty path.
fn key(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
