// Stream payload schemas
//
// Plain data records carried in the `data` field of stream events.
// None of them outlive the event they are encoded into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Message emitted by the counter stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StreamMessage {
    /// Sequence number as a string ("1".."10")
    pub id: String,
    /// Always "message"
    pub event: String,
    /// Human readable description including the send time
    pub data: String,
    pub timestamp: DateTime<Utc>,
}

/// Metadata attached to each generation chunk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChunkMetadata {
    /// Percentage of the response emitted so far (0-100)
    pub progress: u8,
}

/// One word of a simulated text generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GenerationChunk {
    /// The word followed by a single space
    pub content: String,
    /// 1-based position of this chunk
    pub chunk_id: u32,
    /// True only for the last word of the response
    #[serde(default)]
    pub is_final: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChunkMetadata>,
}

/// Task status reported by the progress stream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Progress report for a simulated task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProgressUpdate {
    /// Synthetic task id derived from the start time ("task_<unix seconds>")
    pub task_id: String,
    /// Completion percentage (0-100)
    pub progress: u8,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request body for the POST echo stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChatRequest {
    /// Text to acknowledge and echo back word by word
    #[cfg_attr(feature = "openapi", schema(example = "Hello from POST request"))]
    pub message: String,
    /// Caller identifier echoed in every chunk
    #[serde(default = "default_user_id")]
    #[cfg_attr(feature = "openapi", schema(example = "demo-user"))]
    pub user_id: String,
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

/// Data of the terminal `complete` and `llm_complete` events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CompletionNotice {
    pub message: String,
}

impl CompletionNotice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One echoed word in the POST stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EchoChunk {
    /// The word followed by a single space
    pub chunk: String,
    /// 0-based position of the word in the message
    pub index: usize,
    pub user_id: String,
}

/// Final line of the POST stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EchoComplete {
    pub complete: bool,
    pub message: String,
    /// "Processing your message: '<message>'"
    pub acknowledgement: String,
}

/// Written instead of the remaining lines when the POST stream fails
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EchoFailure {
    pub error: String,
}

impl EchoFailure {
    pub fn new(reason: impl std::fmt::Display) -> Self {
        Self {
            error: format!("Processing failed: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_defaults_user_id() {
        let json = r#"{"message": "hello world"}"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.message, "hello world");
        assert_eq!(req.user_id, "anonymous");
    }

    #[test]
    fn test_chat_request_with_user_id() {
        let json = r#"{"message": "hi", "user_id": "demo-user"}"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.user_id, "demo-user");
    }

    #[test]
    fn test_chat_request_requires_message() {
        let json = r#"{"user_id": "demo-user"}"#;
        assert!(serde_json::from_str::<ChatRequest>(json).is_err());
    }

    #[test]
    fn test_task_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            r#""completed""#
        );
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_generation_chunk_shape() {
        let chunk = GenerationChunk {
            content: "This ".to_string(),
            chunk_id: 1,
            is_final: false,
            metadata: Some(ChunkMetadata { progress: 2 }),
        };
        let value = serde_json::to_value(&chunk).unwrap();
        assert_eq!(value["content"], "This ");
        assert_eq!(value["chunk_id"], 1);
        assert_eq!(value["is_final"], false);
        assert_eq!(value["metadata"]["progress"], 2);
    }

    #[test]
    fn test_echo_chunk_escapes_delimiters() {
        let chunk = EchoChunk {
            chunk: "it's\"} ".to_string(),
            index: 0,
            user_id: "o'brien".to_string(),
        };
        let json = serde_json::to_string(&chunk).unwrap();
        let parsed: EchoChunk = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, chunk);
    }

    #[test]
    fn test_echo_failure_prefix() {
        let failure = EchoFailure::new("boom");
        assert_eq!(failure.error, "Processing failed: boom");
    }
}
