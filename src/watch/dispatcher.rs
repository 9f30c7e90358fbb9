use crate::client::FetchError;
use crate::status::{JobState, JobStatus};

/// Terminal outcome of a watched job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    Completed,
    Failed { message: String },
}

/// Callbacks invoked by the watch session.
///
/// `on_completed` and `on_failed` fire at most once per session; the other
/// hooks fire per poll. Default impls are no-ops so callers implement only
/// what they need.
pub trait JobObserver: Send {
    /// A fresh normalized status was observed.
    fn on_status(&mut self, _status: &JobStatus) {}

    /// A fetch failed. The last-known status stands and polling continues
    /// on the existing cadence.
    fn on_transient_error(&mut self, _error: &FetchError) {}

    fn on_completed(&mut self) {}

    fn on_failed(&mut self, _message: &str) {}
}

/// One-shot latch guarding terminal dispatch for a single job handle.
///
/// The first observed `Completed` or `Failed` sets the latch and yields the
/// event; any later observation (including repeated terminal statuses from
/// a server that keeps answering) yields nothing. A new session gets a
/// fresh latch.
#[derive(Debug, Default)]
pub struct TerminalLatch {
    fired: bool,
}

impl TerminalLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.fired
    }

    pub fn observe(&mut self, status: &JobStatus) -> Option<TerminalEvent> {
        if self.fired {
            return None;
        }

        match status.state {
            JobState::Completed => {
                self.fired = true;
                Some(TerminalEvent::Completed)
            }
            JobState::Failed => {
                self.fired = true;
                Some(TerminalEvent::Failed {
                    message: status.message.clone(),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_with(state: JobState, message: &str) -> JobStatus {
        JobStatus {
            state,
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_non_terminal_states_never_latch() {
        let mut latch = TerminalLatch::new();

        for state in [
            JobState::Unknown,
            JobState::Queued,
            JobState::Running,
            JobState::Other("paused".to_string()),
        ] {
            assert_eq!(latch.observe(&status_with(state, "working")), None);
            assert!(!latch.is_set());
        }
    }

    #[test]
    fn test_completed_fires_exactly_once() {
        let mut latch = TerminalLatch::new();
        let completed = status_with(JobState::Completed, "done");

        assert_eq!(latch.observe(&completed), Some(TerminalEvent::Completed));
        assert!(latch.is_set());

        // Repeated terminal observations are swallowed.
        assert_eq!(latch.observe(&completed), None);
        assert_eq!(latch.observe(&completed), None);
    }

    #[test]
    fn test_failed_carries_message_and_fires_once() {
        let mut latch = TerminalLatch::new();
        let failed = status_with(JobState::Failed, "portal login rejected");

        assert_eq!(
            latch.observe(&failed),
            Some(TerminalEvent::Failed {
                message: "portal login rejected".to_string()
            })
        );
        assert_eq!(latch.observe(&failed), None);
    }

    #[test]
    fn test_latch_ignores_later_conflicting_terminal() {
        let mut latch = TerminalLatch::new();

        latch.observe(&status_with(JobState::Completed, "done"));
        // A failed status after completion must not fire the failure path.
        assert_eq!(latch.observe(&status_with(JobState::Failed, "oops")), None);
    }
}
