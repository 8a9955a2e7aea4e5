//! Live countdown as Server-Sent Events.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};

use crate::domain::countdown::{SystemClock, countdown_ticks};
use crate::state::AppState;

/// Streams the time left until the ceremony.
///
/// # Endpoint
///
/// `GET /countdown`
///
/// # Events
///
/// One `tick` event per second with `DD:HH:MM:SS` as data, then a single
/// `finished` event with `00:00:00:00`, after which the stream closes.
pub async fn countdown_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = countdown_ticks(state.settings.event_starts_at, SystemClock).map(|countdown| {
        let name = if countdown.finished { "finished" } else { "tick" };
        Ok(Event::default().event(name).data(countdown.to_string()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
