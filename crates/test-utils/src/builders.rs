#![allow(dead_code)]

use globwatch::config::{ConfigFile, RawConfigFile};
use globwatch::fs::mock::MockFileSystem;

/// Builder for an in-memory file tree.
///
/// Entries are created in the order given, which is also the order a walk
/// will visit them in.
pub struct MockTreeBuilder {
    fs: MockFileSystem,
}

impl MockTreeBuilder {
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
        }
    }

    pub fn file(self, path: &str) -> Self {
        self.fs.add_file(path);
        self
    }

    pub fn files<'a>(self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        for path in paths {
            self.fs.add_file(path);
        }
        self
    }

    pub fn dir(self, path: &str) -> Self {
        self.fs.add_dir(path);
        self
    }

    pub fn build(self) -> MockFileSystem {
        self.fs
    }
}

impl Default for MockTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The small Go-style module layout used across the tests.
pub fn go_project() -> MockFileSystem {
    MockTreeBuilder::new()
        .files(["go.mod", "go.sum", "cmd/main.go", "internal/tool.go", "internal/tool_test.go"])
        .build()
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.config.watch.pattern = pattern.to_string();
        self
    }

    pub fn with_interval(mut self, interval: &str) -> Self {
        self.config.watch.interval = interval.to_string();
        self
    }

    pub fn with_buffers(mut self, events: usize, errors: usize) -> Self {
        self.config.watch.event_buffer = events;
        self.config.watch.error_buffer = errors;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
