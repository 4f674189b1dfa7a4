use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use globwatch::fs::RealFileSystem;
use globwatch::{Event, Pattern, Watcher, enumerate};
use globwatch_test_utils::{assert_quiet, init_tracing, recv_next};
use tempfile::TempDir;

fn write(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"package x\n").unwrap();
}

fn go_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for rel in [
        "go.mod",
        "cmd/main.go",
        "cmd/main_test.go",
        "internal/tool/tool.go",
        "internal/tool/tool_test.go",
        "internal/cli/cli_test.go",
    ] {
        write(dir.path(), rel);
    }
    dir
}

/// Push a file's modification time forward so the change is visible even on
/// file systems with coarse timestamps.
fn bump_mtime(path: &Path) {
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(5))
        .unwrap();
}

#[test]
fn enumerate_walks_real_directories_in_name_order() {
    let dir = go_tree();
    let fs = RealFileSystem::new(dir.path());
    let pattern = Pattern::new("**/*_test.go").unwrap();

    assert_eq!(
        enumerate(&fs, &pattern, "").unwrap(),
        vec![
            "cmd/main_test.go",
            "internal/cli/cli_test.go",
            "internal/tool/tool_test.go",
        ]
    );
}

#[test]
fn enumerate_reports_missing_root() {
    let dir = go_tree();
    let fs = RealFileSystem::new(dir.path());
    let pattern = Pattern::new("**/*").unwrap();

    assert!(matches!(
        enumerate(&fs, &pattern, "does-not-exist"),
        Err(globwatch::GlobwatchError::Walk { .. })
    ));
}

#[tokio::test]
async fn watches_a_real_directory() {
    init_tracing();
    let dir = go_tree();
    let fs = RealFileSystem::new(dir.path());
    let mut watcher =
        Watcher::new(Arc::new(fs), "**/*_test.go", Duration::from_millis(20)).unwrap();
    let mut events = watcher.take_events().unwrap();
    watcher.start().await.unwrap();

    // Write under another name first so the file appears complete.
    write(dir.path(), "internal/new_test.go.part");
    fs::rename(
        dir.path().join("internal/new_test.go.part"),
        dir.path().join("internal/new_test.go"),
    )
    .unwrap();
    assert_eq!(
        recv_next(&mut events).await,
        Event::created("internal/new_test.go")
    );

    bump_mtime(&dir.path().join("cmd/main_test.go"));
    assert_eq!(
        recv_next(&mut events).await,
        Event::modified("cmd/main_test.go")
    );

    fs::remove_dir_all(dir.path().join("internal/tool")).unwrap();
    assert_eq!(
        recv_next(&mut events).await,
        Event::deleted("internal/tool/tool_test.go")
    );

    write(dir.path(), "README.md");
    assert_quiet(&mut events, Duration::from_millis(100)).await;

    watcher.close().await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn backslash_in_a_unix_file_name_is_tracked_as_is() {
    init_tracing();
    let dir = go_tree();
    write(dir.path(), "cmd/a\\b_test.go");
    let fs = RealFileSystem::new(dir.path());
    let pattern = Pattern::new("cmd/*_test.go").unwrap();

    assert_eq!(
        enumerate(&fs, &pattern, "").unwrap(),
        vec!["cmd/a\\b_test.go", "cmd/main_test.go"]
    );

    let mut watcher =
        Watcher::new(Arc::new(fs), "cmd/*_test.go", Duration::from_millis(20)).unwrap();
    let mut events = watcher.take_events().unwrap();
    let mut errors = watcher.take_errors().unwrap();
    watcher.start().await.unwrap();

    bump_mtime(&dir.path().join("cmd/a\\b_test.go"));
    assert_eq!(
        recv_next(&mut events).await,
        Event::modified("cmd/a\\b_test.go")
    );
    assert_quiet(&mut errors, Duration::from_millis(100)).await;

    watcher.close().await.unwrap();
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_file_names_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    init_tracing();
    let dir = go_tree();
    fs::write(
        dir.path().join("cmd").join(OsStr::from_bytes(b"bad\xff_test.go")),
        b"package x\n",
    )
    .unwrap();
    let fs = RealFileSystem::new(dir.path());
    let pattern = Pattern::new("cmd/*_test.go").unwrap();

    assert_eq!(
        enumerate(&fs, &pattern, "").unwrap(),
        vec!["cmd/main_test.go"]
    );
}
