use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::Extension,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

use crate::app::services::AppServices;

/// Server-sent change feed: one event per table mutation, so dashboards can
/// re-query what they display. Lossy by design.
pub async fn stream(
    Extension(services): Extension<Arc<AppServices>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.feed.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(change) => {
            let data = serde_json::to_string(&change).unwrap_or_else(|_| "{}".to_string());
            Some(Ok(SseEvent::default().event(change.tabla).data(data)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
