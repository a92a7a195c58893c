mod dispatch;
mod engine;
pub mod events;
mod health;
pub mod http;
mod request;

pub use engine::{EngineError, ExecutionEngine};
pub use events::{CompositeEventSink, Event, EventSink, NoOpEventSink, TracingEventSink};
pub use health::HealthStatus;
pub use http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
