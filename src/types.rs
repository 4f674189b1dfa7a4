use std::fmt;

/// Kind of change observed for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A matching file appeared.
    Created,
    /// A tracked file's modification time moved forward.
    Modified,
    /// A tracked file no longer matches (removed or moved away).
    Deleted,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Created => "created",
            EventType::Modified => "modified",
            EventType::Deleted => "deleted",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so callers can use width/alignment flags.
        f.pad(self.as_str())
    }
}

/// A change to one file, relative to the watched root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    pub kind: EventType,
    pub path: String,
}

impl Event {
    pub fn new(kind: EventType, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn created(path: impl Into<String>) -> Self {
        Self::new(EventType::Created, path)
    }

    pub fn modified(path: impl Into<String>) -> Self {
        Self::new(EventType::Modified, path)
    }

    pub fn deleted(path: impl Into<String>) -> Self {
        Self::new(EventType::Deleted, path)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8} {}", self.kind, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_names() {
        assert_eq!(EventType::Created.to_string(), "created");
        assert_eq!(EventType::Modified.to_string(), "modified");
        assert_eq!(EventType::Deleted.to_string(), "deleted");
    }

    #[test]
    fn event_display_right_aligns_kind() {
        assert_eq!(
            Event::created("cmd/main_test.go").to_string(),
            " created cmd/main_test.go"
        );
        assert_eq!(Event::modified("a").to_string(), "modified a");
    }
}
