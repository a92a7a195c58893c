#![forbid(unsafe_code)]

//! Execution side of the action gateway: resolves a team's action at a
//! version, validates its parameters and dispatches it to the flow adapter
//! over HTTP with bounded retries.

pub mod executor;
pub mod retry;

pub use crate::executor::{
    CompositeEventSink, EngineError, Event, EventSink, ExecutionEngine, HealthStatus, HttpClient,
    HttpError, HttpRequestParts, HttpResponseParts, NoOpEventSink, ReqwestHttpClient,
    TracingEventSink,
};
pub use crate::retry::{decide_retry, RetryConfig, RetryDecision, RetryReason};
