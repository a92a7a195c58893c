use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use sics_core::types::iso_timestamp;
use sics_core::{generate_request_id, Action, AdapterConfig, ExecutionContext, ParameterMap};

use crate::executor::http::HttpRequestParts;

pub(crate) const HEADER_API_VERSION: &str = "X-API-Version";
pub(crate) const HEADER_REQUEST_ID: &str = "X-Request-ID";
pub(crate) const HEADER_TIMESTAMP: &str = "X-Timestamp";

/// JSON body POSTed to the flow adapter.
#[derive(Debug, Serialize)]
pub(crate) struct DispatchPayload<'a> {
    pub action: &'a str,
    pub version: &'a str,
    pub team: &'a str,
    pub parameters: &'a ParameterMap,
    #[serde(rename = "requestId")]
    pub request_id: &'a str,
    pub timestamp: String,
}

impl<'a> DispatchPayload<'a> {
    pub fn new(action: &'a Action, ctx: &'a ExecutionContext) -> Self {
        Self {
            action: &action.id,
            version: &ctx.version,
            team: &ctx.team_id,
            parameters: &ctx.parameters,
            request_id: &ctx.request_id,
            timestamp: ctx.timestamp_iso(),
        }
    }
}

/// `<base>/<path>` with exactly one slash at the seam.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<url::Url, String> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url::Url::parse(&joined).map_err(|e| format!("invalid endpoint url '{joined}': {e}"))
}

/// Headers shared by every outbound call. The request id and timestamp are
/// minted per call so retries are distinguishable on the wire.
pub(crate) fn transport_headers(config: &AdapterConfig) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert(HEADER_API_VERSION.to_string(), config.api_version.clone());
    headers.insert(
        HEADER_REQUEST_ID.to_string(),
        generate_request_id(sics_core::context::DEFAULT_REQUEST_ID_PREFIX),
    );
    headers.insert(HEADER_TIMESTAMP.to_string(), iso_timestamp(&Utc::now()));
    headers
}

pub(crate) fn build_dispatch_request(
    config: &AdapterConfig,
    url: &url::Url,
    body: &[u8],
) -> HttpRequestParts {
    HttpRequestParts {
        method: "POST".to_string(),
        url: url.clone(),
        headers: transport_headers(config),
        body: body.to_vec(),
    }
}

pub(crate) fn build_health_request(config: &AdapterConfig) -> Result<HttpRequestParts, String> {
    Ok(HttpRequestParts {
        method: "GET".to_string(),
        url: endpoint_url(&config.base_url, "health")?,
        headers: transport_headers(config),
        body: Vec::new(),
    })
}
