#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;
use sics_core::types::ParameterType;
use sics_core::{
    Action, ActionCategory, ActionParameter, AdapterConfig, ExecutionContext,
    ExecutionContextBuilder, TeamConfig,
};
use sics_exec::{Event, EventSink, HttpClient, HttpError, HttpRequestParts, HttpResponseParts};

pub const BASE_URL: &str = "http://localhost:3001/api";

/// Replays scripted outcomes in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedHttpClient {
    script: Mutex<VecDeque<Result<HttpResponseParts, HttpError>>>,
    pub requests: Mutex<Vec<HttpRequestParts>>,
}

impl ScriptedHttpClient {
    pub fn new(script: Vec<Result<HttpResponseParts, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, i: usize) -> HttpRequestParts {
        self.requests.lock().unwrap()[i].clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Other("script exhausted".to_string())))
    }
}

pub fn response(status: u16, body: serde_json::Value) -> Result<HttpResponseParts, HttpError> {
    Ok(HttpResponseParts {
        status,
        body: serde_json::to_vec(&body).unwrap(),
    })
}

pub fn empty_response(status: u16) -> Result<HttpResponseParts, HttpError> {
    Ok(HttpResponseParts {
        status,
        body: Vec::new(),
    })
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn retry_delays(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::RetryScheduled { delay_ms, .. } => Some(delay_ms),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn test_action() -> Action {
    let mut action = Action::new("test-action", "Test Action", ActionCategory::Utility, "/flow/test-action");
    action.parameters = vec![
        ActionParameter::new("input", ParameterType::String).required(),
        ActionParameter::new("message", ParameterType::String),
    ];
    action
}

pub fn config(retry_attempts: u32) -> AdapterConfig {
    let mut cfg = AdapterConfig::new(
        BASE_URL,
        vec![TeamConfig::new(
            "test-team",
            "Test Team",
            vec![">=1.0.0".to_string()],
            "1.0.0",
        )],
    );
    cfg.retry_attempts = retry_attempts;
    cfg.global_actions = vec![test_action()];
    cfg
}

pub fn context(version: &str) -> ExecutionContext {
    ExecutionContextBuilder::new()
        .team("test-team")
        .version(version)
        .action(test_action())
        .add_parameter("input", "hello")
        .request_id("req-123")
        .timestamp(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap())
        .build()
        .unwrap()
}

pub fn ok_body() -> serde_json::Value {
    json!({ "success": true, "result": { "processed": true } })
}
