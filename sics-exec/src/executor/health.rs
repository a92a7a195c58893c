use serde::{Deserialize, Serialize};
use serde_json::json;
use sics_core::{AdapterConfig, ErrorCode, SicsError};

use crate::executor::dispatch::{status_failure, transport_failure};
use crate::executor::http::HttpClient;
use crate::executor::request::build_health_request;

const HEALTH_CHECK_FAILED: &str = "Health check failed";

/// Body returned by the flow adapter's `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Single GET, never retried.
pub(crate) async fn probe(
    config: &AdapterConfig,
    http: &dyn HttpClient,
) -> Result<HealthStatus, SicsError> {
    let req = build_health_request(config).map_err(|e| {
        SicsError::new(ErrorCode::HealthCheckError, HEALTH_CHECK_FAILED).with_details(json!(e))
    })?;

    let resp = http
        .send(req, config.timeout_duration())
        .await
        .map_err(|e| transport_failure(ErrorCode::HealthCheckError, HEALTH_CHECK_FAILED, &e))?;

    if !resp.is_success() {
        return Err(status_failure(ErrorCode::HealthCheckError, HEALTH_CHECK_FAILED, &resp));
    }

    serde_json::from_slice(&resp.body).map_err(|e| {
        SicsError::new(ErrorCode::HealthCheckError, HEALTH_CHECK_FAILED)
            .with_details(json!(format!("malformed health response: {e}")))
    })
}
