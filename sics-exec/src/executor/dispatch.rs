use std::time::Duration;

use serde_json::json;
use sics_core::{AdapterConfig, AnyValue, ErrorCode, SicsError};

use crate::executor::events::{Event, EventSink};
use crate::executor::http::{HttpClient, HttpError, HttpResponseParts};
use crate::executor::request::{build_dispatch_request, HEADER_REQUEST_ID};
use crate::retry::{decide_retry, RetryConfig, RetryDecision};

pub(crate) struct Dispatcher<'a> {
    pub config: &'a AdapterConfig,
    pub http: &'a dyn HttpClient,
    pub retry: &'a RetryConfig,
    pub event_sink: &'a dyn EventSink,
}

enum AttemptOutcome {
    Succeeded(HttpResponseParts),
    Failed {
        status: Option<u16>,
        error: SicsError,
    },
}

impl Dispatcher<'_> {
    /// POST `body` to `url`, retrying 5xx responses with exponential backoff.
    /// Returns the decoded response body or the terminal failure.
    pub async fn dispatch(
        &self,
        request_id: &str,
        url: &url::Url,
        body: &[u8],
    ) -> Result<AnyValue, SicsError> {
        let timeout = self.config.timeout_duration();
        let mut attempt_no = 0usize;

        loop {
            attempt_no += 1;
            let req = build_dispatch_request(self.config, url, body);
            let transport_request_id = req
                .headers
                .get(HEADER_REQUEST_ID)
                .cloned()
                .unwrap_or_default();

            self.event_sink
                .emit(Event::AttemptStarted {
                    request_id: request_id.to_string(),
                    attempt_no,
                    transport_request_id,
                })
                .await;

            let outcome = classify(self.http.send(req, timeout).await);
            let (status, error) = match outcome {
                AttemptOutcome::Succeeded(resp) => {
                    self.emit_attempt_finished(request_id, attempt_no, Some(resp.status), true)
                        .await;
                    return Ok(resp.body_value());
                }
                AttemptOutcome::Failed { status, error } => (status, error),
            };
            self.emit_attempt_finished(request_id, attempt_no, status, false)
                .await;

            match decide_retry(self.retry, attempt_no, status) {
                RetryDecision::RetryAfter { delay, .. } => {
                    self.emit_retry_scheduled(request_id, attempt_no, delay).await;
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::Stop { reason } => {
                    tracing::debug!(%request_id, attempt_no, ?reason, "giving up on dispatch");
                    return Err(error);
                }
            }
        }
    }

    async fn emit_attempt_finished(
        &self,
        request_id: &str,
        attempt_no: usize,
        status: Option<u16>,
        succeeded: bool,
    ) {
        self.event_sink
            .emit(Event::AttemptFinished {
                request_id: request_id.to_string(),
                attempt_no,
                status,
                succeeded,
            })
            .await;
    }

    async fn emit_retry_scheduled(&self, request_id: &str, attempt_no: usize, delay: Duration) {
        self.event_sink
            .emit(Event::RetryScheduled {
                request_id: request_id.to_string(),
                attempt_no,
                delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            })
            .await;
    }
}

fn classify(sent: Result<HttpResponseParts, HttpError>) -> AttemptOutcome {
    match sent {
        Ok(resp) if resp.is_success() => AttemptOutcome::Succeeded(resp),
        Ok(resp) => AttemptOutcome::Failed {
            status: Some(resp.status),
            error: status_failure(ErrorCode::ExecutionError, "Action execution failed", &resp),
        },
        Err(e) => AttemptOutcome::Failed {
            status: None,
            error: transport_failure(ErrorCode::ExecutionError, "Action execution failed", &e),
        },
    }
}

/// Failure for a non-2xx response: details carry the body when there is one.
pub(crate) fn status_failure(
    code: ErrorCode,
    message: &str,
    resp: &HttpResponseParts,
) -> SicsError {
    let details = match resp.body_value() {
        AnyValue::Null => json!(format!("Request failed with status code {}", resp.status)),
        body => body,
    };
    SicsError::new(code, message).with_details(details)
}

pub(crate) fn transport_failure(code: ErrorCode, message: &str, err: &HttpError) -> SicsError {
    SicsError::new(code, message)
        .with_details(json!(err.to_string()))
        .with_stack(format!("{err:?}"))
}
