//! Server-Sent Events support

use super::types::StateView;
use crate::runtime::SseEvent;
use crate::state_machine::AppState;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert broadcast stream to SSE stream, starting with the current state
pub fn sse_stream(
    initial: AppState,
    broadcast_rx: tokio::sync::broadcast::Receiver<SseEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move {
        Ok(Event::default()
            .event("init")
            .data(state_payload("init", initial).to_string()))
    });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(sse_event_to_axum(event))),
        Err(_) => None, // Skip lagged messages
    });

    let combined = init.chain(broadcasts);

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn state_payload(event_type: &str, state: AppState) -> serde_json::Value {
    json!({
        "type": event_type,
        "state": StateView::from(state),
    })
}

fn sse_event_to_axum(event: SseEvent) -> Event {
    let (event_type, data) = match event {
        SseEvent::StateChange { state } => ("state_change", state_payload("state_change", *state)),
        SseEvent::Notice { message } => (
            "notice",
            json!({
                "type": "notice",
                "message": message
            }),
        ),
    };

    Event::default().event(event_type).data(data.to_string())
}
