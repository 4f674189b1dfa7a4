// src/watch/state.rs

//! Pure change-detection core.
//!
//! [`WatchState`] owns the path -> modification time mapping and turns
//! successive [`Scan`]s into events. It has **no** channels, no Tokio types,
//! and does not perform any IO; the async shell in [`super::watcher`] feeds
//! it scans and publishes what it returns.

use std::collections::{BTreeMap, HashSet};
use std::time::SystemTime;

use tracing::debug;

use crate::errors::GlobwatchError;
use crate::types::Event;

use super::scan::Scan;

/// Result of applying one scan: events to publish and advisory errors.
#[derive(Debug, Default)]
pub struct TickReport {
    /// `Created`/`Modified` in walk order, then `Deleted` in path order.
    pub events: Vec<Event>,
    pub errors: Vec<GlobwatchError>,
}

impl TickReport {
    /// A report for a tick whose walk failed outright.
    pub fn failed(error: GlobwatchError) -> Self {
        Self {
            events: Vec::new(),
            errors: vec![error],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.errors.is_empty()
    }
}

/// Last observed modification time of every tracked file.
#[derive(Debug, Default)]
pub struct WatchState {
    modtimes: BTreeMap<String, SystemTime>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the initial state without producing events.
    ///
    /// Files whose stat fails are left untracked and reported back; they
    /// show up as `Created` on the first tick that can stat them.
    pub fn seed(&mut self, scan: Scan) -> Vec<GlobwatchError> {
        let mut errors = Vec::new();

        for file in scan.files {
            match file.modified {
                Ok(modified) => {
                    self.modtimes.insert(file.path, modified);
                }
                Err(source) => errors.push(GlobwatchError::Stat {
                    path: file.path,
                    source,
                }),
            }
        }

        debug!(tracked = self.modtimes.len(), "seeded watch state");
        errors
    }

    /// Apply one scan.
    ///
    /// - new path: tracked, `Created`
    /// - known path with a strictly later time: updated, `Modified`
    /// - known path missing from the scan: dropped, `Deleted`
    ///
    /// A path whose stat failed keeps its previous state for this tick; it
    /// is neither updated nor considered deleted.
    pub fn diff(&mut self, scan: Scan) -> TickReport {
        let mut report = TickReport::default();
        let mut seen = HashSet::with_capacity(scan.len());

        for file in scan.files {
            seen.insert(file.path.clone());

            let modified = match file.modified {
                Ok(modified) => modified,
                Err(source) => {
                    report.errors.push(GlobwatchError::Stat {
                        path: file.path,
                        source,
                    });
                    continue;
                }
            };

            match self.modtimes.get_mut(&file.path) {
                None => {
                    report.events.push(Event::created(file.path.clone()));
                    self.modtimes.insert(file.path, modified);
                }
                Some(known) if modified > *known => {
                    *known = modified;
                    report.events.push(Event::modified(file.path));
                }
                Some(_) => {}
            }
        }

        self.modtimes.retain(|path, _| {
            let keep = seen.contains(path);
            if !keep {
                report.events.push(Event::deleted(path.clone()));
            }
            keep
        });

        report
    }

    pub fn len(&self) -> usize {
        self.modtimes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modtimes.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.modtimes.contains_key(path)
    }

    pub fn modified(&self, path: &str) -> Option<SystemTime> {
        self.modtimes.get(path).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::pattern::Pattern;
    use crate::types::EventType;
    use crate::watch::scan::scan;

    fn setup() -> (MockFileSystem, Pattern, WatchState) {
        let fs = MockFileSystem::new();
        for path in [
            "go.mod",
            "go.sum",
            "cmd/main.go",
            "internal/tool.go",
            "internal/tool_test.go",
        ] {
            fs.add_file(path);
        }
        let pattern = Pattern::new("**/*_test.go").unwrap();

        let mut state = WatchState::new();
        let errors = state.seed(scan(&fs, &pattern).unwrap());
        assert!(errors.is_empty());

        (fs, pattern, state)
    }

    fn tick(fs: &MockFileSystem, pattern: &Pattern, state: &mut WatchState) -> TickReport {
        state.diff(scan(fs, pattern).unwrap())
    }

    #[test]
    fn seeding_tracks_matches_without_events() {
        let (_fs, _pattern, state) = setup();
        assert_eq!(state.len(), 1);
        assert!(state.contains("internal/tool_test.go"));
    }

    #[test]
    fn created_modified_deleted_sequence() {
        let (fs, pattern, mut state) = setup();

        fs.touch("go.mod");
        fs.touch("cmd/main_test.go");
        let report = tick(&fs, &pattern, &mut state);
        assert_eq!(report.events, vec![Event::created("cmd/main_test.go")]);

        fs.touch("cmd/main_test.go");
        fs.touch("internal/tool_test.go");
        let report = tick(&fs, &pattern, &mut state);
        assert_eq!(
            report.events,
            vec![
                Event::modified("cmd/main_test.go"),
                Event::modified("internal/tool_test.go"),
            ]
        );

        fs.remove("internal");
        let report = tick(&fs, &pattern, &mut state);
        assert_eq!(report.events, vec![Event::deleted("internal/tool_test.go")]);
        assert!(!state.contains("internal/tool_test.go"));
        assert!(report.errors.is_empty());
    }

    #[test]
    fn unchanged_tree_yields_nothing() {
        let (fs, pattern, mut state) = setup();
        assert!(tick(&fs, &pattern, &mut state).is_empty());
        assert!(tick(&fs, &pattern, &mut state).is_empty());
    }

    #[test]
    fn older_timestamp_is_not_a_modification() {
        let (fs, pattern, mut state) = setup();
        fs.set_modified("internal/tool_test.go", std::time::UNIX_EPOCH);

        assert!(tick(&fs, &pattern, &mut state).is_empty());
    }

    #[test]
    fn creations_precede_deletions() {
        let (fs, pattern, mut state) = setup();
        fs.remove("internal/tool_test.go");
        fs.touch("a_test.go");
        fs.touch("z/z_test.go");

        let kinds: Vec<EventType> = tick(&fs, &pattern, &mut state)
            .events
            .into_iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![EventType::Created, EventType::Created, EventType::Deleted]
        );
    }

    #[test]
    fn stat_failure_keeps_previous_state() {
        let (fs, pattern, mut state) = setup();
        let before = state.modified("internal/tool_test.go");

        fs.touch("internal/tool_test.go");
        fs.fail_stat("internal/tool_test.go");
        let report = tick(&fs, &pattern, &mut state);

        assert!(report.events.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(
            &report.errors[0],
            GlobwatchError::Stat { path, .. } if path == "internal/tool_test.go"
        ));
        assert_eq!(state.modified("internal/tool_test.go"), before);

        fs.clear_failures();
        let report = tick(&fs, &pattern, &mut state);
        assert_eq!(report.events, vec![Event::modified("internal/tool_test.go")]);
    }

    #[test]
    fn seed_reports_stat_failures_and_leaves_file_untracked() {
        let fs = MockFileSystem::new();
        fs.add_file("x_test.go");
        fs.fail_stat("x_test.go");
        let pattern = Pattern::new("*_test.go").unwrap();

        let mut state = WatchState::new();
        let errors = state.seed(scan(&fs, &pattern).unwrap());
        assert_eq!(errors.len(), 1);
        assert!(state.is_empty());

        fs.clear_failures();
        let report = state.diff(scan(&fs, &pattern).unwrap());
        assert_eq!(report.events, vec![Event::created("x_test.go")]);
    }
}
