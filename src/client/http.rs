use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::FetchError;
use super::models::{HealthReport, JobAccepted, ScrapeRequest};
use crate::status::JobHandle;

pub type Result<T> = std::result::Result<T, FetchError>;

/// HTTP client configuration.
///
/// Submission-class calls get the longer timeout; status polls use a
/// shorter one so a stuck request can never hang the poll scheduler.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub connect_timeout: Duration,
    pub submit_timeout: Duration,
    pub status_timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            username: String::new(),
            password: String::new(),
            connect_timeout: Duration::from_secs(10),
            submit_timeout: Duration::from_secs(15),
            status_timeout: Duration::from_secs(10),
            user_agent: "scrapewatch/0.1.0".to_string(),
        }
    }
}

/// Source of raw status payloads for a job handle.
///
/// The watch session polls through this seam so tests can script status
/// sequences without a network.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the current raw status payload for a job.
    ///
    /// A 2xx body that is not valid JSON yields `Value::Null`; body shape
    /// is the normalizer's concern, not a fetch error.
    async fn fetch_status(&self, job: &JobHandle) -> Result<Value>;
}

/// Authenticated client for the scraper backend.
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Submit a scrape job (`POST /scrape`) and return its handle.
    pub async fn submit_job(&self, request: &ScrapeRequest) -> Result<JobHandle> {
        let url = self.url("/scrape");
        debug!(%url, academic_year = %request.academic_year, "submitting scrape job");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .timeout(self.config.submit_timeout)
            .json(request)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let response = check_status(response).await?;

        let accepted: JobAccepted = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        match accepted.job_id {
            Some(id) if !id.is_empty() => Ok(JobHandle::new(id)),
            _ => Err(FetchError::InvalidResponse("missing job_id".to_string())),
        }
    }

    /// Connectivity check against `GET /health`.
    pub async fn ping(&self) -> Result<HealthReport> {
        let url = self.url("/health");
        debug!(%url, "checking server health");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .timeout(self.config.status_timeout)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn fetch_status(&self, job: &JobHandle) -> Result<Value> {
        let url = self.url(&format!("/job/{}", job));
        debug!(job_id = %job, %url, "fetching job status");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .timeout(self.config.status_timeout)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(job.to_string()));
        }

        let response = check_status(response).await?;
        let body = response
            .bytes()
            .await
            .map_err(FetchError::from_transport)?;

        // Malformed bodies degrade in the normalizer, not here.
        Ok(serde_json::from_slice(&body).unwrap_or(Value::Null))
    }
}

/// Map a non-2xx response into the error taxonomy.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(FetchError::Unauthorized);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(response.url().path().to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "server returned error response");

    Err(FetchError::ServerError {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.submit_timeout, Duration::from_secs(15));
        assert_eq!(config.status_timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "scrapewatch/0.1.0");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(ApiConfig {
            base_url: "http://example.com/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(client.url("/job/abc"), "http://example.com/job/abc");
    }
}
