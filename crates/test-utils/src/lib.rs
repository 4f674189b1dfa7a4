pub mod builders;

use std::sync::Once;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Receive the next item, failing the test if none arrives within 5 seconds
/// or the channel closes.
pub async fn recv_next<T>(rx: &mut mpsc::Receiver<T>) -> T {
    with_timeout(rx.recv())
        .await
        .expect("channel closed while waiting for an item")
}

/// Assert that nothing arrives on `rx` for `quiet`.
pub async fn assert_quiet<T: std::fmt::Debug>(rx: &mut mpsc::Receiver<T>, quiet: Duration) {
    if let Ok(Some(item)) = tokio::time::timeout(quiet, rx.recv()).await {
        panic!("expected no item, got {item:?}");
    }
}
