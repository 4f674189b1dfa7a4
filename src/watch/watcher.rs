// src/watch/watcher.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::{GlobwatchError, Result};
use crate::fs::FileSystem;
use crate::pattern::Pattern;
use crate::types::Event;
use crate::watch::scan::{Scan, scan};
use crate::watch::state::{TickReport, WatchState};

/// Default capacity of both the event and the error channel.
pub const DEFAULT_BUFFER: usize = 10;

/// Channel sizing for a [`Watcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherOptions {
    pub event_buffer: usize,
    pub error_buffer: usize,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            event_buffer: DEFAULT_BUFFER,
            error_buffer: DEFAULT_BUFFER,
        }
    }
}

/// Polling watcher for the files of a [`FileSystem`] that match a pattern.
///
/// Changes are reported on a bounded event channel and problems on a bounded
/// error channel (see [`Watcher::take_events`] / [`Watcher::take_errors`]).
/// Both channels must be drained: when either is full the watch loop waits,
/// and so does [`Watcher::close`].
///
/// Lifecycle: created idle, [`start`](Watcher::start)ed once, then
/// [`close`](Watcher::close)d. A closed watcher cannot be restarted; closing
/// again is a no-op. Dropping a running watcher stops its loop.
pub struct Watcher {
    fs: Arc<dyn FileSystem>,
    pattern: Arc<Pattern>,
    interval: Duration,
    events: Option<mpsc::Receiver<Event>>,
    errors: Option<mpsc::Receiver<GlobwatchError>>,
    lifecycle: Lifecycle,
}

enum Lifecycle {
    Idle(Publisher),
    Running {
        stop: CancellationToken,
        task: JoinHandle<()>,
    },
    Closed,
}

impl std::fmt::Debug for Watcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lifecycle = match self.lifecycle {
            Lifecycle::Idle(_) => "idle",
            Lifecycle::Running { .. } => "running",
            Lifecycle::Closed => "closed",
        };
        f.debug_struct("Watcher")
            .field("pattern", &self.pattern)
            .field("interval", &self.interval)
            .field("lifecycle", &lifecycle)
            .finish_non_exhaustive()
    }
}

impl Watcher {
    /// Create an idle watcher for `pattern` (relative to the root of `fs`),
    /// polling every `interval`.
    ///
    /// Fails if the pattern does not compile.
    pub fn new(fs: Arc<dyn FileSystem>, pattern: &str, interval: Duration) -> Result<Self> {
        Self::with_options(fs, pattern, interval, WatcherOptions::default())
    }

    pub fn with_options(
        fs: Arc<dyn FileSystem>,
        pattern: &str,
        interval: Duration,
        options: WatcherOptions,
    ) -> Result<Self> {
        Self::from_pattern(fs, Pattern::new(pattern)?, interval, options)
    }

    /// Like [`Watcher::with_options`] for an already compiled pattern.
    pub fn from_pattern(
        fs: Arc<dyn FileSystem>,
        pattern: Pattern,
        interval: Duration,
        options: WatcherOptions,
    ) -> Result<Self> {
        if interval.is_zero() {
            return Err(GlobwatchError::ConfigError(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if options.event_buffer == 0 || options.error_buffer == 0 {
            return Err(GlobwatchError::ConfigError(
                "event and error buffers must hold at least one entry".to_string(),
            ));
        }

        let (events_tx, events_rx) = mpsc::channel(options.event_buffer);
        let (errors_tx, errors_rx) = mpsc::channel(options.error_buffer);

        Ok(Self {
            fs,
            pattern: Arc::new(pattern),
            interval,
            events: Some(events_rx),
            errors: Some(errors_rx),
            lifecycle: Lifecycle::Idle(Publisher {
                events: events_tx,
                errors: errors_tx,
            }),
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Receiver for change events. Available once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<Event>> {
        self.events.take()
    }

    /// Receiver for advisory errors raised while watching. Available once.
    pub fn take_errors(&mut self) -> Option<mpsc::Receiver<GlobwatchError>> {
        self.errors.take()
    }

    /// Whether the watch loop is live. False once it has been closed or has
    /// stopped on its cancellation token.
    pub fn is_running(&self) -> bool {
        match &self.lifecycle {
            Lifecycle::Running { task, .. } => !task.is_finished(),
            Lifecycle::Idle(_) | Lifecycle::Closed => false,
        }
    }

    /// Start watching until [`close`](Watcher::close) is called.
    pub async fn start(&mut self) -> Result<()> {
        self.start_with_cancellation(CancellationToken::new()).await
    }

    /// Start watching until `cancel` fires or [`close`](Watcher::close) is
    /// called, whichever comes first.
    ///
    /// Takes the initial snapshot before returning. If that walk fails the
    /// error is returned and the watcher stays idle.
    pub async fn start_with_cancellation(&mut self, cancel: CancellationToken) -> Result<()> {
        let publisher = match std::mem::replace(&mut self.lifecycle, Lifecycle::Closed) {
            Lifecycle::Idle(publisher) => publisher,
            Lifecycle::Closed => return Err(GlobwatchError::WatcherClosed),
            running @ Lifecycle::Running { .. } => {
                self.lifecycle = running;
                return Err(GlobwatchError::AlreadyStarted);
            }
        };

        let initial = match scan_blocking(&self.fs, &self.pattern).await {
            Ok(scan) => scan,
            Err(err) => {
                self.lifecycle = Lifecycle::Idle(publisher);
                return Err(err);
            }
        };

        let mut state = WatchState::new();
        let seed_errors = state.seed(initial);

        info!(
            pattern = %self.pattern,
            interval = ?self.interval,
            tracked = state.len(),
            "watcher started"
        );

        let stop = CancellationToken::new();
        let poller = Poller {
            fs: Arc::clone(&self.fs),
            pattern: Arc::clone(&self.pattern),
            state,
            publisher,
        };
        let task = tokio::spawn(run_loop(
            poller,
            self.interval,
            stop.clone(),
            cancel,
            seed_errors,
        ));

        self.lifecycle = Lifecycle::Running { stop, task };
        Ok(())
    }

    /// Stop watching and close both channels.
    ///
    /// Waits for a tick in progress to finish publishing. Closing an idle
    /// watcher just closes its channels; closing twice does nothing.
    pub async fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Closed) {
            Lifecycle::Idle(publisher) => {
                drop(publisher);
                debug!("closed watcher before it was started");
            }
            Lifecycle::Running { stop, task } => {
                stop.cancel();
                task.await.map_err(anyhow::Error::from)?;
                info!(pattern = %self.pattern, "watcher closed");
            }
            Lifecycle::Closed => {
                debug!("watcher already closed");
            }
        }
        Ok(())
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        if let Lifecycle::Running { stop, .. } = &self.lifecycle {
            stop.cancel();
        }
    }
}

/// Sending half of the two output channels.
#[derive(Debug)]
struct Publisher {
    events: mpsc::Sender<Event>,
    errors: mpsc::Sender<GlobwatchError>,
}

impl Publisher {
    /// Send everything in `report`, waiting for room in the channels.
    async fn publish(&self, report: TickReport) {
        for event in report.events {
            if self.events.send(event).await.is_err() {
                warn!("event receiver dropped; discarding events");
                break;
            }
        }
        for error in report.errors {
            if self.errors.send(error).await.is_err() {
                warn!("error receiver dropped; discarding errors");
                break;
            }
        }
    }
}

/// Everything one tick needs; owned by the loop task.
struct Poller {
    fs: Arc<dyn FileSystem>,
    pattern: Arc<Pattern>,
    state: WatchState,
    publisher: Publisher,
}

impl Poller {
    /// One full enumerate-diff-publish pass. Not interrupted by close or
    /// cancellation once begun.
    async fn tick(&mut self) {
        let report = match scan_blocking(&self.fs, &self.pattern).await {
            Ok(scan) => self.state.diff(scan),
            Err(err) => {
                warn!(error = %err, "walk failed; skipping this tick");
                TickReport::failed(err)
            }
        };

        debug!(
            events = report.events.len(),
            errors = report.errors.len(),
            tracked = self.state.len(),
            "tick complete"
        );

        self.publisher.publish(report).await;
    }
}

async fn run_loop(
    mut poller: Poller,
    interval: Duration,
    stop: CancellationToken,
    cancel: CancellationToken,
    seed_errors: Vec<GlobwatchError>,
) {
    poller
        .publisher
        .publish(TickReport {
            events: Vec::new(),
            errors: seed_errors,
        })
        .await;

    // First tick one interval from now; a slow tick pushes the next one back.
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => poller.tick().await,
            _ = stop.cancelled() => {
                debug!("close requested; stopping watch loop");
                break;
            }
            _ = cancel.cancelled() => {
                debug!("cancelled; stopping watch loop");
                break;
            }
        }
    }
    // Dropping `poller` here closes both channels.
}

async fn scan_blocking(fs: &Arc<dyn FileSystem>, pattern: &Arc<Pattern>) -> Result<Scan> {
    let fs = Arc::clone(fs);
    let pattern = Arc::clone(pattern);
    tokio::task::spawn_blocking(move || scan(fs.as_ref(), &pattern))
        .await
        .map_err(anyhow::Error::from)?
}
