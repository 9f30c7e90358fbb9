use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier for one scrape job, as returned by `POST /scrape`.
///
/// Immutable once assigned; the watch session takes it by value and never
/// inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a scrape job.
///
/// `Completed` and `Failed` are terminal. Server strings outside the known
/// set are preserved verbatim in `Other` and treated as non-terminal, so an
/// unexpected state keeps the poll loop alive instead of silently stopping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobState {
    /// No successful fetch yet, or the payload carried no state.
    #[default]
    Unknown,
    Queued,
    Running,
    Completed,
    Failed,
    /// Unrecognized server state, kept verbatim for display.
    Other(String),
}

impl JobState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "queued" => JobState::Queued,
            "running" => JobState::Running,
            "completed" => JobState::Completed,
            "failed" => JobState::Failed,
            other => JobState::Other(other.to_string()),
        }
    }

    /// Terminal states stop polling; everything else keeps the cadence.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Unknown => f.write_str("unknown"),
            JobState::Queued => f.write_str("queued"),
            JobState::Running => f.write_str("running"),
            JobState::Completed => f.write_str("completed"),
            JobState::Failed => f.write_str("failed"),
            JobState::Other(s) => f.write_str(s),
        }
    }
}

/// Outcome of one sub-task (attendance, mid_marks, personal_details,
/// upload) as echoed by the server once the job completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    #[serde(default)]
    pub success: bool,
    /// Free-form per-task statistics (label -> value), display only.
    #[serde(default)]
    pub stats: BTreeMap<String, serde_json::Value>,
}

/// Job configuration echoes plus, once completed, per-task results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub scrape_attendance: bool,
    #[serde(default)]
    pub scrape_mid_marks: bool,
    #[serde(default)]
    pub scrape_personal_details: bool,
    #[serde(default)]
    pub upload_to_supabase: bool,
    #[serde(default)]
    pub force_update: bool,
    /// Keyed by task name; populated only for completed jobs.
    #[serde(default)]
    pub results: BTreeMap<String, TaskOutcome>,
}

/// Canonical, fully-defaulted view of a job's last observed status.
///
/// Replaced wholesale by each successful fetch, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct JobStatus {
    pub state: JobState,
    pub message: String,
    /// Fraction complete in [0.0, 1.0].
    pub progress: f64,
    pub details: JobDetails,
    /// Client-side timestamp of the fetch that produced this value.
    pub observed_at: chrono::DateTime<chrono::Utc>,
}

impl Default for JobStatus {
    fn default() -> Self {
        Self {
            state: JobState::Unknown,
            message: super::normalize::DEFAULT_MESSAGE.to_string(),
            progress: 0.0,
            details: JobDetails::default(),
            observed_at: chrono::Utc::now(),
        }
    }
}
