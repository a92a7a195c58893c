use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::SicsError;
use crate::types::{Action, AnyValue, ParameterMap};

/// One call request. Built per call and never mutated once handed to the engine.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionContext {
    #[serde(rename = "teamId")]
    pub team_id: String,

    pub version: String,

    pub action: Action,

    #[serde(default)]
    pub parameters: ParameterMap,

    #[serde(rename = "requestId")]
    pub request_id: String,

    pub timestamp: DateTime<Utc>,
}

impl ExecutionContext {
    /// ISO-8601 timestamp with millisecond precision and a `Z` suffix.
    pub fn timestamp_iso(&self) -> String {
        iso_timestamp(&self.timestamp)
    }
}

pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SicsError>,

    /// Wall-clock milliseconds from the start of `execute` to the outcome.
    #[serde(rename = "executionTime")]
    pub execution_time: u64,

    #[serde(rename = "requestId")]
    pub request_id: String,
}

impl ExecutionResult {
    pub fn succeeded(data: AnyValue, execution_time: u64, request_id: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            execution_time,
            request_id: request_id.into(),
        }
    }

    pub fn failed(error: SicsError, execution_time: u64, request_id: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            execution_time,
            request_id: request_id.into(),
        }
    }
}
