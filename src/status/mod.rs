//! Canonical job status model and payload normalization.
//!
//! The scraper backend reports job progress as loosely-structured JSON.
//! This module defines the canonical local view ([`JobStatus`]) and the
//! normalization path from a raw payload into it. Normalization never
//! fails: a malformed or partial payload degrades to defaults so the
//! watch loop keeps observing instead of halting on a parse anomaly.

mod model;
mod normalize;

pub use model::{JobDetails, JobHandle, JobState, JobStatus, TaskOutcome};
pub use normalize::normalize;
