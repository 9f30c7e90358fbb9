//! Poll scheduler and lifecycle dispatch for one observed job.
//!
//! A [`WatchSession`](session::WatchSession) owns the whole observation of
//! a single job handle: it issues the first fetch immediately, re-arms one
//! delay after each processed result, normalizes payloads, and dispatches
//! the terminal callback exactly once through a [`TerminalLatch`]. The
//! session runs as a single tokio task, so at most one fetch is in flight
//! per handle and statuses are applied in fetch order.

mod dispatcher;
mod session;

pub use dispatcher::{JobObserver, TerminalEvent, TerminalLatch};
pub use session::{StopHandle, WatchHandle, WatchOptions, WatchOutcome, WatchSession};
