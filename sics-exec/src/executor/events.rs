use std::sync::Arc;

use async_trait::async_trait;
use sics_core::ErrorCode;

/// Lifecycle notifications emitted by `ExecutionEngine::execute`.
///
/// `request_id` is always the caller's context request id; the per-attempt
/// transport id travels separately as `transport_request_id`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ExecutionStarted {
        request_id: String,
        team_id: String,
        action_id: String,
        version: String,
    },
    ExecutionRejected {
        request_id: String,
        code: ErrorCode,
        message: String,
    },
    AttemptStarted {
        request_id: String,
        attempt_no: usize,
        transport_request_id: String,
    },
    AttemptFinished {
        request_id: String,
        attempt_no: usize,
        status: Option<u16>,
        succeeded: bool,
    },
    RetryScheduled {
        request_id: String,
        attempt_no: usize,
        delay_ms: u64,
    },
    ExecutionFinished {
        request_id: String,
        success: bool,
        execution_time_ms: u64,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ExecutionStarted { .. } => "execution.started",
            Event::ExecutionRejected { .. } => "execution.rejected",
            Event::AttemptStarted { .. } => "attempt.started",
            Event::AttemptFinished { .. } => "attempt.finished",
            Event::RetryScheduled { .. } => "retry.scheduled",
            Event::ExecutionFinished { .. } => "execution.finished",
        }
    }

    pub fn request_id(&self) -> &str {
        match self {
            Event::ExecutionStarted { request_id, .. }
            | Event::ExecutionRejected { request_id, .. }
            | Event::AttemptStarted { request_id, .. }
            | Event::AttemptFinished { request_id, .. }
            | Event::RetryScheduled { request_id, .. }
            | Event::ExecutionFinished { request_id, .. } => request_id,
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

#[derive(Default)]
pub struct CompositeEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.add(sink);
        self
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Writes every event as a structured `tracing` record.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: Event) {
        let kind = event.kind();
        match event {
            Event::ExecutionStarted {
                request_id,
                team_id,
                action_id,
                version,
            } => {
                tracing::debug!(event = kind, %request_id, %team_id, %action_id, %version);
            }
            Event::ExecutionRejected {
                request_id,
                code,
                message,
            } => {
                tracing::warn!(event = kind, %request_id, code = code.as_str(), %message);
            }
            Event::AttemptStarted {
                request_id,
                attempt_no,
                transport_request_id,
            } => {
                tracing::debug!(event = kind, %request_id, attempt_no, %transport_request_id);
            }
            Event::AttemptFinished {
                request_id,
                attempt_no,
                status,
                succeeded,
            } => {
                tracing::debug!(event = kind, %request_id, attempt_no, ?status, succeeded);
            }
            Event::RetryScheduled {
                request_id,
                attempt_no,
                delay_ms,
            } => {
                tracing::info!(event = kind, %request_id, attempt_no, delay_ms);
            }
            Event::ExecutionFinished {
                request_id,
                success,
                execution_time_ms,
            } => {
                if success {
                    tracing::info!(event = kind, %request_id, execution_time_ms);
                } else {
                    tracing::warn!(event = kind, %request_id, execution_time_ms, "execution failed");
                }
            }
        }
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
