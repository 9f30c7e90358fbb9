use serde_json::Value;
use tracing::warn;

use super::model::{JobDetails, JobState, JobStatus};

pub(crate) const DEFAULT_MESSAGE: &str = "Waiting for job status...";

/// Normalize a raw status payload into the canonical [`JobStatus`].
///
/// This function never fails. Missing or malformed fields degrade to
/// defaults: no `status` string means `Unknown`, `progress` is clamped to
/// [0.0, 1.0], absent `details` becomes the empty default. Keeping the job
/// observable matters more than rejecting an odd payload.
pub fn normalize(raw: &Value) -> JobStatus {
    let state = match raw.get("status").and_then(Value::as_str) {
        Some(s) => JobState::parse(s),
        None => JobState::Unknown,
    };

    if let JobState::Other(s) = &state {
        // Flagged for operator attention; the loop keeps polling.
        warn!(state = %s, "server reported unrecognized job state");
    }

    let message = raw
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_MESSAGE)
        .to_string();

    let progress = raw
        .get("progress")
        .and_then(Value::as_f64)
        .map(clamp_progress)
        .unwrap_or(0.0);

    let details = raw
        .get("details")
        .cloned()
        .map(|v| serde_json::from_value::<JobDetails>(v).unwrap_or_default())
        .unwrap_or_default();

    JobStatus {
        state,
        message,
        progress,
        details,
        observed_at: chrono::Utc::now(),
    }
}

fn clamp_progress(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
