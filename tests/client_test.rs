//! Integration tests for the scraper-backend client.
//!
//! Each test stands up a real axum server on an ephemeral port and drives
//! the client against it, so status mapping and auth headers are exercised
//! over actual HTTP.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use scrapewatch::client::{ApiClient, ApiConfig, FetchError, ScrapeRequest, StatusSource};
use scrapewatch::status::JobHandle;

/// Serve `app` on an ephemeral port and return its base URL.
async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    format!("http://{}", addr)
}

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url: base_url.to_string(),
        username: "api-user".to_string(),
        password: "api-pass".to_string(),
        ..Default::default()
    })
    .expect("failed to build client")
}

fn test_request() -> ScrapeRequest {
    ScrapeRequest {
        username: "student".to_string(),
        password: "portal-pass".to_string(),
        academic_year: "2024-25".to_string(),
        scrape_attendance: true,
        scrape_mid_marks: false,
        scrape_personal_details: false,
        upload_to_supabase: true,
        force_update: false,
    }
}

#[tokio::test]
async fn test_submit_returns_job_handle() {
    let app = Router::new().route(
        "/scrape",
        post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
            // Credentials must ride along as HTTP Basic auth.
            assert!(headers.contains_key(header::AUTHORIZATION));
            assert_eq!(body["academic_year"], "2024-25");
            assert_eq!(body["upload_to_supabase"], json!(true));
            Json(json!({"job_id": "job-123"}))
        }),
    );
    let base_url = spawn_server(app).await;

    let job = test_client(&base_url)
        .submit_job(&test_request())
        .await
        .expect("submission failed");

    assert_eq!(job.as_str(), "job-123");
}

#[tokio::test]
async fn test_submit_without_job_id_is_invalid_response() {
    let app = Router::new().route(
        "/scrape",
        post(|| async { Json(json!({"accepted": true})) }),
    );
    let base_url = spawn_server(app).await;

    let result = test_client(&base_url).submit_job(&test_request()).await;
    assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_unauthorized_is_mapped() {
    let app = Router::new().route(
        "/scrape",
        post(|| async { StatusCode::UNAUTHORIZED }),
    );
    let base_url = spawn_server(app).await;

    let result = test_client(&base_url).submit_job(&test_request()).await;
    assert!(matches!(result, Err(FetchError::Unauthorized)));
}

#[tokio::test]
async fn test_fetch_status_unknown_handle_is_not_found() {
    let app = Router::new().route(
        "/job/{id}",
        get(|Path(_id): Path<String>| async { StatusCode::NOT_FOUND }),
    );
    let base_url = spawn_server(app).await;

    let result = test_client(&base_url)
        .fetch_status(&JobHandle::new("job-999"))
        .await;

    match result {
        Err(FetchError::NotFound(id)) => assert_eq!(id, "job-999"),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_fetch_status_server_error_carries_body() {
    let app = Router::new().route(
        "/job/{id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "scraper crashed") }),
    );
    let base_url = spawn_server(app).await;

    let result = test_client(&base_url)
        .fetch_status(&JobHandle::new("job-1"))
        .await;

    match result {
        Err(FetchError::ServerError { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "scraper crashed");
        }
        other => panic!("expected ServerError, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_fetch_status_non_json_body_degrades_to_null() {
    let app = Router::new().route("/job/{id}", get(|| async { "<html>oops</html>" }));
    let base_url = spawn_server(app).await;

    let raw = test_client(&base_url)
        .fetch_status(&JobHandle::new("job-1"))
        .await
        .expect("2xx with junk body must not be a fetch error");

    assert!(raw.is_null());
}

#[tokio::test]
async fn test_fetch_status_returns_payload_verbatim() {
    let app = Router::new().route(
        "/job/{id}",
        get(|Path(id): Path<String>| async move {
            Json(json!({"status": "running", "message": format!("working on {}", id), "progress": 0.5}))
        }),
    );
    let base_url = spawn_server(app).await;

    let raw = test_client(&base_url)
        .fetch_status(&JobHandle::new("job-7"))
        .await
        .expect("fetch failed");

    assert_eq!(raw["status"], "running");
    assert_eq!(raw["message"], "working on job-7");
}

#[tokio::test]
async fn test_ping_reports_health() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            Json(json!({
                "status": "ok",
                "components": {"scraper": "ready", "supabase": "ready"},
                "version": "1.2.0"
            }))
        }),
    );
    let base_url = spawn_server(app).await;

    let report = test_client(&base_url).ping().await.expect("ping failed");
    assert_eq!(report.status, "ok");
    assert_eq!(report.components["scraper"], "ready");
    assert_eq!(report.version.as_deref(), Some("1.2.0"));
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    // Grab an ephemeral port, then close the listener so nothing answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = test_client(&format!("http://{}", addr))
        .fetch_status(&JobHandle::new("job-1"))
        .await;

    assert!(matches!(result, Err(FetchError::Unreachable(_))));
}
