// Adapters between core stream generators and HTTP response bodies
//
// Every streaming response owns a ClientConnection drop guard. Hyper drops the
// body when the peer goes away, which trips the guard and marks the connection
// disconnected. A stream that runs to completion releases its guard first.

use std::{
    convert::Infallible,
    pin::Pin,
    task::{ready, Context, Poll},
};

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use futures::{
    stream::{BoxStream, Stream},
    StreamExt,
};
use ssedemo_core::{ClientConnection, StreamEvent};
use tokio_util::sync::DropGuard;

/// Stream wrapper that ties a client connection to the response body lifetime
pub struct ConnectionBound<T> {
    name: &'static str,
    inner: BoxStream<'static, T>,
    guard: Option<DropGuard>,
}

impl<T> ConnectionBound<T> {
    pub fn new<S>(name: &'static str, connection: &ClientConnection, inner: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        Self {
            name,
            inner: inner.boxed(),
            guard: Some(connection.drop_guard()),
        }
    }
}

impl<T> Stream for ConnectionBound<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let item = ready!(self.inner.poll_next_unpin(cx));
        if item.is_none() {
            if let Some(guard) = self.guard.take() {
                guard.disarm();
                tracing::debug!(stream = self.name, "Stream finished");
            }
        }
        Poll::Ready(item)
    }
}

impl<T> Drop for ConnectionBound<T> {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!(stream = self.name, "Client disconnected before stream finished");
        }
    }
}

/// Convert a core event into an axum SSE event
pub fn to_sse_event(event: StreamEvent) -> SseEvent {
    SseEvent::default()
        .event(event.event)
        .id(event.id)
        .data(event.data)
}

/// Build an SSE response from a generator bound to `connection`
pub fn sse_response<S>(
    name: &'static str,
    connection: &ClientConnection,
    events: S,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>>
where
    S: Stream<Item = StreamEvent> + Send + 'static,
{
    let stream = ConnectionBound::new(name, connection, events)
        .map(|event| Ok::<_, Infallible>(to_sse_event(event)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}
