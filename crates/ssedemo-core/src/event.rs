// SSE event envelope
//
// Each event carries a name, a stringified sequence id, and JSON data.
// The API crate maps this onto axum's Sse event type.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Result, StreamError};

/// Event name for counter messages
pub const EVENT_MESSAGE: &str = "message";
/// Event name for the counter stream's terminal marker
pub const EVENT_COMPLETE: &str = "complete";
/// Event name for generation chunks
pub const EVENT_LLM_CHUNK: &str = "llm_chunk";
/// Event name for the generation stream's terminal marker
pub const EVENT_LLM_COMPLETE: &str = "llm_complete";
/// Event name for progress updates
pub const EVENT_PROGRESS: &str = "progress";

/// A single server-sent event ready to be written to the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    pub event: &'static str,
    pub id: String,
    pub data: String,
}

impl StreamEvent {
    /// Build an event whose data is the JSON encoding of `payload`
    pub fn json<T: Serialize>(event: &'static str, id: impl ToString, payload: &T) -> Result<Self> {
        let data = serde_json::to_string(payload).map_err(|e| StreamError::encode(event, e))?;
        Ok(Self {
            event,
            id: id.to_string(),
            data,
        })
    }

    /// Decode the data field back into a payload
    pub fn payload<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CompletionNotice;

    #[test]
    fn test_json_event_envelope() {
        let event = StreamEvent::json(
            EVENT_COMPLETE,
            11,
            &CompletionNotice::new("Stream completed"),
        )
        .unwrap();

        assert_eq!(event.event, "complete");
        assert_eq!(event.id, "11");
        assert_eq!(event.data, r#"{"message":"Stream completed"}"#);

        let notice: CompletionNotice = event.payload().unwrap();
        assert_eq!(notice.message, "Stream completed");
    }
}
