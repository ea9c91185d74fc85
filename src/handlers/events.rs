use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::sse::{Event, Sse};
use serde::Deserialize;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};
use tokio_stream::StreamExt;

use crate::errors::AppError;
use crate::state::AppState;

const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
pub struct EventsQuery {
    pub token: Option<String>,
}

// GET /api/admin/events (SSE stream of booking changes)
pub async fn booking_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, AppError> {
    // EventSource can't set headers, so the token travels in the query.
    let token = query.token.as_deref().unwrap_or("");
    if token.is_empty() || token != state.config.admin_token {
        return Err(AppError::Unauthorized);
    }

    let rx = state.bookings.subscribe();

    let live_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => {
            let data = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok(Event::default().data(data).event("booking_event")))
        }
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "booking event subscriber lagged");
            None
        }
    });

    let keepalive_stream =
        IntervalStream::new(tokio::time::interval(KEEPALIVE_INTERVAL))
            .map(|_| Ok(Event::default().comment("keepalive")));

    Ok(Sse::new(live_stream.merge(keepalive_stream)))
}
