use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sics_exec::{CompositeEventSink, Event, EventSink, NoOpEventSink, TracingEventSink};

#[derive(Default)]
struct Counter {
    seen: Mutex<Vec<&'static str>>,
}

#[async_trait]
impl EventSink for Counter {
    async fn emit(&self, event: Event) {
        self.seen.lock().unwrap().push(event.kind());
    }
}

fn finished() -> Event {
    Event::ExecutionFinished {
        request_id: "req-1".to_string(),
        success: true,
        execution_time_ms: 12,
    }
}

#[tokio::test]
async fn composite_fans_out_to_every_sink() {
    let a = Arc::new(Counter::default());
    let b = Arc::new(Counter::default());
    let composite = CompositeEventSink::new()
        .with(a.clone())
        .with(Arc::new(NoOpEventSink))
        .with(Arc::new(TracingEventSink))
        .with(b.clone());

    composite.emit(finished()).await;
    composite
        .emit(Event::RetryScheduled {
            request_id: "req-1".to_string(),
            attempt_no: 1,
            delay_ms: 2000,
        })
        .await;

    let expected = vec!["execution.finished", "retry.scheduled"];
    assert_eq!(*a.seen.lock().unwrap(), expected);
    assert_eq!(*b.seen.lock().unwrap(), expected);
}

#[test]
fn events_expose_their_request_id() {
    assert_eq!(finished().request_id(), "req-1");
}
