// SSE Streaming Demo Core
//
// This crate provides the HTTP-agnostic half of the streaming demo:
// payload schemas, the SSE envelope, and the four stream generators.
//
// Key design decisions:
// - Every generator is a futures::Stream built with stream::unfold, so all
//   per-request state (counters, word lists) is owned by the stream itself
// - Client disconnect is observed through ClientConnection, a cancellation
//   token checked once before every emitted item
// - Pacing delays come from StreamConfig so tests can drive them with a paused clock
// - Payloads are encoded with serde_json; nothing is built by string interpolation

pub mod config;
pub mod connection;
pub mod error;
pub mod event;
pub mod schemas;
pub mod streams;

// Re-exports for convenience
pub use config::StreamConfig;
pub use connection::ClientConnection;
pub use error::{Result, StreamError};
pub use event::StreamEvent;
pub use schemas::{
    ChatRequest, ChunkMetadata, CompletionNotice, EchoChunk, EchoComplete, EchoFailure,
    GenerationChunk, ProgressUpdate, StreamMessage, TaskStatus,
};
pub use streams::{
    canned_response, counter_stream, echo_stream, generation_stream, progress_stream,
};
