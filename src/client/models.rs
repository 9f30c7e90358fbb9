use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payload for `POST /scrape`: portal credentials plus the flags selecting
/// which data categories to extract and whether to persist them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub username: String,
    pub password: String,
    pub academic_year: String,
    pub scrape_attendance: bool,
    pub scrape_mid_marks: bool,
    pub scrape_personal_details: bool,
    pub upload_to_supabase: bool,
    pub force_update: bool,
}

/// Accepted-job response; the server may include extra fields we ignore.
#[derive(Debug, Clone, Deserialize)]
pub struct JobAccepted {
    pub job_id: Option<String>,
}

/// Server self-report from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub components: HashMap<String, String>,
    #[serde(default)]
    pub version: Option<String>,
}
