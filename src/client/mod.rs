//! Authenticated HTTP client for the scraper backend.
//!
//! Covers the three server interactions the observer needs: submitting a
//! scrape job (`POST /scrape`), fetching the current status of a job
//! (`GET /job/{id}`), and the connectivity check (`GET /health`). All
//! calls carry HTTP Basic credentials and bounded timeouts.

mod error;
mod http;
mod models;

pub use error::FetchError;
pub use http::{ApiClient, ApiConfig, StatusSource};
pub use models::{HealthReport, JobAccepted, ScrapeRequest};
