mod common;

use serde_json::json;
use sics_core::ErrorCode;
use sics_exec::{ExecutionEngine, HealthStatus, HttpError};

use common::*;

fn engine(http: std::sync::Arc<ScriptedHttpClient>) -> ExecutionEngine {
    ExecutionEngine::with_http_client(config(3), http).unwrap()
}

#[tokio::test]
async fn healthy_adapter_reports_status() {
    let http = ScriptedHttpClient::new(vec![response(
        200,
        json!({ "status": "healthy", "version": "1.0.0", "timestamp": "2024-01-01T00:00:00.000Z" }),
    )]);
    let status = engine(http.clone()).health_check().await.unwrap();

    assert_eq!(
        status,
        HealthStatus {
            status: "healthy".to_string(),
            version: "1.0.0".to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        }
    );
    let req = http.request(0);
    assert_eq!(req.method, "GET");
    assert_eq!(req.url.as_str(), "http://localhost:3001/api/health");
    assert!(req.body.is_empty());
    assert_eq!(req.headers["X-API-Version"], "v1");
}

#[tokio::test(start_paused = true)]
async fn server_error_is_not_retried() {
    let http = ScriptedHttpClient::new(vec![
        response(503, json!({ "error": "down" })),
        response(200, json!({ "status": "healthy", "version": "1", "timestamp": "t" })),
    ]);
    let err = engine(http.clone()).health_check().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::HealthCheckError);
    assert_eq!(err.message, "Health check failed");
    assert_eq!(err.details, Some(json!({ "error": "down" })));
    assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn transport_failure_is_a_health_check_error() {
    let http = ScriptedHttpClient::new(vec![Err(HttpError::Timeout)]);
    let err = engine(http.clone()).health_check().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::HealthCheckError);
    assert_eq!(err.details, Some(json!("timeout")));
    assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn malformed_body_is_a_health_check_error() {
    let http = ScriptedHttpClient::new(vec![response(200, json!({ "status": 1 }))]);
    let err = engine(http).health_check().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::HealthCheckError);
}
