use thiserror::Error;

/// Client-side error taxonomy for calls against the scraper backend.
///
/// These are all transient from the watch loop's point of view: a fetch
/// error is surfaced to the observer for display but never latches a
/// terminal outcome and never stops the polling cadence by itself.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unauthorized: server rejected credentials")]
    Unauthorized,

    #[error("job not found: {0}")]
    NotFound(String),

    #[error("request timed out")]
    Timeout,

    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("server error (HTTP {status}): {body}")]
    ServerError { status: u16, body: String },

    #[error("invalid response from server: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Map a transport-level reqwest failure (no HTTP status available).
    pub(super) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Unreachable(err.to_string())
        }
    }
}
