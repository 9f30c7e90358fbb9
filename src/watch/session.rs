use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::dispatcher::{JobObserver, TerminalEvent, TerminalLatch};
use crate::client::StatusSource;
use crate::observability::Metrics;
use crate::status::{JobHandle, JobStatus, normalize};

/// Watch session tuning.
#[derive(Clone)]
pub struct WatchOptions {
    /// Delay between a processed result and the next fetch.
    pub poll_interval: Duration,
    pub metrics: Arc<Metrics>,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            metrics: Arc::new(Metrics::new()),
        }
    }
}

/// Final accounting for a finished (or stopped) session.
#[derive(Debug)]
pub struct WatchOutcome {
    /// Last successfully normalized status; `Unknown` if no fetch landed.
    pub last_status: JobStatus,
    /// Set when the session observed a terminal state before stopping.
    pub terminal: Option<TerminalEvent>,
    pub polls: u64,
    pub fetch_errors: u64,
}

/// Handle to a running session: idempotent stop plus join for the outcome.
pub struct WatchHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<WatchOutcome>,
}

impl WatchHandle {
    /// Stop observing. Safe to call any number of times; results from a
    /// fetch in flight at the time of the call are discarded, so no
    /// observer callback fires after this returns.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    pub async fn join(self) -> Result<WatchOutcome, JoinError> {
        self.task.await
    }

    /// Detached stop handle, usable after `join` has consumed the session
    /// handle (e.g. from a ctrl-c task).
    pub fn stopper(&self) -> StopHandle {
        StopHandle(self.stop.clone())
    }
}

/// Cloneable handle that only stops the session.
#[derive(Clone)]
pub struct StopHandle(watch::Sender<bool>);

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.0.send(true);
    }
}

/// Timer-driven observation of a single job handle.
pub struct WatchSession;

impl WatchSession {
    /// Start observing `job`. The first fetch is issued immediately, not
    /// after one interval, so a fast-completing job is reported promptly.
    pub fn spawn(
        source: Arc<dyn StatusSource>,
        job: JobHandle,
        observer: impl JobObserver + 'static,
        options: WatchOptions,
    ) -> WatchHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run(source, job, observer, options, stop_rx));

        WatchHandle {
            stop: stop_tx,
            task,
        }
    }
}

async fn run(
    source: Arc<dyn StatusSource>,
    job: JobHandle,
    mut observer: impl JobObserver,
    options: WatchOptions,
    mut stop: watch::Receiver<bool>,
) -> WatchOutcome {
    let metrics = options.metrics;
    let mut latch = TerminalLatch::new();
    let mut last_status = JobStatus::default();
    let mut terminal = None;
    let mut polls = 0u64;
    let mut fetch_errors = 0u64;

    info!(job_id = %job, interval = ?options.poll_interval, "watch session started");

    loop {
        // One fetch in flight at a time; stop aborts it mid-request.
        let result = tokio::select! {
            result = source.fetch_status(&job) => result,
            _ = stop.changed() => break,
        };
        polls += 1;
        metrics.poll_issued();

        // A stop racing the response wins: discard the late result so
        // nothing mutates state after disposal.
        if *stop.borrow() {
            debug!(job_id = %job, "discarding fetch result after stop");
            break;
        }

        match result {
            Ok(raw) => {
                let status = normalize(&raw);
                debug!(
                    job_id = %job,
                    state = %status.state,
                    progress = status.progress,
                    "status observed"
                );
                observer.on_status(&status);

                if let Some(event) = latch.observe(&status) {
                    match &event {
                        TerminalEvent::Completed => {
                            info!(job_id = %job, "job completed");
                            metrics.job_completed();
                            observer.on_completed();
                        }
                        TerminalEvent::Failed { message } => {
                            warn!(job_id = %job, %message, "job failed");
                            metrics.job_failed();
                            observer.on_failed(message);
                        }
                    }
                    terminal = Some(event);
                }

                let done = status.state.is_terminal();
                last_status = status;
                if done {
                    break;
                }
            }
            Err(error) => {
                fetch_errors += 1;
                metrics.poll_failed();
                warn!(job_id = %job, %error, "status fetch failed, keeping cadence");
                observer.on_transient_error(&error);
            }
        }

        tokio::select! {
            _ = sleep(options.poll_interval) => {}
            _ = stop.changed() => break,
        }
    }

    info!(job_id = %job, polls, fetch_errors, "watch session ended");

    WatchOutcome {
        last_status,
        terminal,
        polls,
        fetch_errors,
    }
}
