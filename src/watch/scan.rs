// src/watch/scan.rs

//! Blocking half of a tick: enumerate matching files and stat each one.

use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::pattern::{Pattern, enumerate};

/// One matching file and the outcome of asking for its modification time.
#[derive(Debug)]
pub struct ScannedFile {
    pub path: String,
    pub modified: io::Result<SystemTime>,
}

/// Everything one walk of the watched root observed, in walk order.
#[derive(Debug, Default)]
pub struct Scan {
    pub files: Vec<ScannedFile>,
}

impl Scan {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Walk the root of `fs` with `pattern` and stat every match.
///
/// A failed walk is returned as an error; a failed stat is kept inside the
/// scan so the caller can treat it per file.
pub fn scan(fs: &dyn FileSystem, pattern: &Pattern) -> Result<Scan> {
    let files = enumerate(fs, pattern, "")?
        .into_iter()
        .map(|path| {
            let modified = fs.modified(Path::new(&path));
            ScannedFile { path, modified }
        })
        .collect();

    Ok(Scan { files })
}
