//! Observability stubs (in-process metrics)

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for watch-session activity.
#[derive(Debug, Default)]
pub struct Metrics {
    polls_issued: AtomicU64,
    poll_failures: AtomicU64,
    jobs_completed: AtomicU64,
    jobs_failed: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll_issued(&self) {
        self.polls_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn poll_failed(&self) {
        self.poll_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "poll_failures", "Metric incremented");
    }

    pub fn job_completed(&self) {
        self.jobs_completed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "jobs_completed", "Metric incremented");
    }

    pub fn job_failed(&self) {
        self.jobs_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "jobs_failed", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            polls_issued: self.polls_issued.load(Ordering::Relaxed),
            poll_failures: self.poll_failures.load(Ordering::Relaxed),
            jobs_completed: self.jobs_completed.load(Ordering::Relaxed),
            jobs_failed: self.jobs_failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub polls_issued: u64,
    pub poll_failures: u64,
    pub jobs_completed: u64,
    pub jobs_failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.poll_issued();
        metrics.poll_issued();
        metrics.poll_failed();
        metrics.job_completed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.polls_issued, 2);
        assert_eq!(snapshot.poll_failures, 1);
        assert_eq!(snapshot.jobs_completed, 1);
        assert_eq!(snapshot.jobs_failed, 0);
    }
}
