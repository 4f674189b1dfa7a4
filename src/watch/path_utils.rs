// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Component, Path};

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Both paths are expected to live in the same (file system relative) space,
/// as produced by [`crate::fs::FileSystem::read_dir`]. Leading `./` on
/// either side is ignored.
///
/// Returns `None` if `path` is not below `root` or is not valid UTF-8.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    join_components(rel, |name| name.to_str().map(str::to_owned))
}

/// Render `path` with `/` separators for messages. Lossy for non-UTF-8 names.
pub fn to_slash(path: &Path) -> String {
    join_components(path, |name| Some(name.to_string_lossy().into_owned())).unwrap_or_default()
}

/// Join the normal components of `path` with `/`. Only real separators
/// split names, so a `\` inside a Unix file name stays part of that name.
fn join_components(
    path: &Path,
    name: impl Fn(&std::ffi::OsStr) -> Option<String>,
) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(name(part)?),
            Component::CurDir => {}
            other => parts.push(name(other.as_os_str())?),
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_root_and_normalises_separators() {
        assert_eq!(
            relative_str(Path::new("."), Path::new("./cmd/main.go")).as_deref(),
            Some("cmd/main.go")
        );
        assert_eq!(
            relative_str(Path::new(""), Path::new("cmd/main.go")).as_deref(),
            Some("cmd/main.go")
        );
        assert_eq!(
            relative_str(Path::new("internal"), Path::new("internal/tool/t.go")).as_deref(),
            Some("tool/t.go")
        );
        assert_eq!(relative_str(Path::new("a"), Path::new("b/c")), None);
    }

    #[cfg(unix)]
    #[test]
    fn backslash_is_part_of_a_unix_file_name() {
        assert_eq!(
            relative_str(Path::new(""), Path::new("cmd/a\\b_test.go")).as_deref(),
            Some("cmd/a\\b_test.go")
        );
        assert_eq!(to_slash(Path::new("a\\b")), "a\\b");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_not_relative_strings() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = Path::new(OsStr::from_bytes(b"bad\xff.go"));
        assert_eq!(relative_str(Path::new(""), name), None);
        assert_eq!(to_slash(name), "bad\u{fffd}.go");
    }
}
