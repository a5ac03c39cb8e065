// Periodic counter stream: "message" x 10, then "complete"

use chrono::Utc;
use futures::stream::{self, Stream};

use super::pace;
use crate::config::{StreamConfig, COUNTER_MESSAGE_COUNT};
use crate::connection::ClientConnection;
use crate::error::Result;
use crate::event::{StreamEvent, EVENT_COMPLETE, EVENT_MESSAGE};
use crate::schemas::{CompletionNotice, StreamMessage};

/// Stream of timestamped counter messages followed by a completion marker
pub fn counter_stream(
    connection: ClientConnection,
    config: &StreamConfig,
) -> impl Stream<Item = StreamEvent> + Send + 'static {
    let interval = config.counter_interval;

    stream::unfold(0u32, move |sent| {
        let connection = connection.clone();
        async move {
            if sent > COUNTER_MESSAGE_COUNT {
                return None;
            }

            pace(sent as usize, interval).await;

            if connection.is_disconnected() {
                tracing::debug!(sent, "Client disconnected, stopping counter stream");
                return None;
            }

            let counter = sent + 1;
            let event = if sent == COUNTER_MESSAGE_COUNT {
                tracing::info!(messages = sent, "Counter stream completed");
                completion_event(counter)
            } else {
                message_event(counter)
            };

            match event {
                Ok(event) => Some((event, counter)),
                Err(e) => {
                    tracing::error!("Failed to encode counter event: {}", e);
                    None
                }
            }
        }
    })
}

fn message_event(counter: u32) -> Result<StreamEvent> {
    let now = Utc::now();
    let message = StreamMessage {
        id: counter.to_string(),
        event: EVENT_MESSAGE.to_string(),
        data: format!("Server message #{} at {}", counter, now.to_rfc3339()),
        timestamp: now,
    };
    StreamEvent::json(EVENT_MESSAGE, counter, &message)
}

fn completion_event(id: u32) -> Result<StreamEvent> {
    StreamEvent::json(EVENT_COMPLETE, id, &CompletionNotice::new("Stream completed"))
}
