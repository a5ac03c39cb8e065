// Streaming HTTP routes
//
// GET endpoints answer with text/event-stream built from core StreamEvents.
// POST /stream/post writes raw `data:` lines with no event name, for clients
// that read the body with fetch + ReadableStream instead of EventSource.

use std::{convert::Infallible, sync::Arc};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{
        sse::{Event as SseEvent, Sse},
        Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use ssedemo_core::{
    config::DEFAULT_PROMPT, counter_stream, echo_stream, generation_stream, progress_stream,
    ChatRequest, ClientConnection, StreamConfig,
};
use utoipa::IntoParams;

use crate::sse::{sse_response, ConnectionBound};

// ============================================
// App State and Routes
// ============================================

/// App state for stream routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StreamConfig>,
}

impl AppState {
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Create stream routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/stream", get(basic_stream))
        .route("/stream/llm", get(llm_stream))
        .route("/stream/progress/:task_name", get(task_progress_stream))
        .route("/stream/post", post(post_stream))
        .with_state(state)
}

// ============================================
// Query Parameters
// ============================================

/// Query parameters for the generation stream
#[derive(Debug, Deserialize, IntoParams)]
pub struct LlmQuery {
    /// Prompt quoted in the first line of the simulated response
    #[param(example = "Tell me about SSE streaming")]
    pub prompt: Option<String>,
}

// ============================================
// HTTP Handlers
// ============================================

/// GET /stream - Counter stream
///
/// Sends ten "message" events two seconds apart, then a "complete" event.
#[utoipa::path(
    get,
    path = "/stream",
    responses(
        (status = 200, description = "Counter event stream", content_type = "text/event-stream")
    ),
    tag = "streams"
)]
pub async fn basic_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    tracing::info!("Starting counter stream");
    let connection = ClientConnection::new();
    let events = counter_stream(connection.clone(), &state.config);
    sse_response("counter", &connection, events)
}

/// GET /stream/llm - Simulated text generation
///
/// Streams a canned response one word per "llm_chunk" event, then "llm_complete".
#[utoipa::path(
    get,
    path = "/stream/llm",
    params(LlmQuery),
    responses(
        (status = 200, description = "Generation event stream", content_type = "text/event-stream")
    ),
    tag = "streams"
)]
pub async fn llm_stream(
    State(state): State<AppState>,
    Query(query): Query<LlmQuery>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let prompt = query.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    tracing::info!(prompt = %prompt, "Starting generation stream");
    let connection = ClientConnection::new();
    let events = generation_stream(&prompt, connection.clone(), &state.config);
    sse_response("generation", &connection, events)
}

/// GET /stream/progress/{task_name} - Simulated task progress
///
/// Streams 21 "progress" events for steps 0 through 20.
#[utoipa::path(
    get,
    path = "/stream/progress/{task_name}",
    params(
        ("task_name" = String, Path, description = "Name of the simulated task")
    ),
    responses(
        (status = 200, description = "Progress event stream", content_type = "text/event-stream")
    ),
    tag = "streams"
)]
pub async fn task_progress_stream(
    State(state): State<AppState>,
    Path(task_name): Path<String>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    tracing::info!(task_name = %task_name, "Starting progress stream");
    let connection = ClientConnection::new();
    let events = progress_stream(&task_name, connection.clone(), &state.config);
    sse_response("progress", &connection, events)
}

/// POST /stream/post - Echo a message back word by word
///
/// The body is a sequence of `data: <json>` lines: one chunk per word of the
/// message, then a completion line. Malformed bodies are rejected before any
/// stream is opened.
#[utoipa::path(
    post,
    path = "/stream/post",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chunked echo stream", content_type = "text/event-stream"),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Body does not match ChatRequest")
    ),
    tag = "streams"
)]
pub async fn post_stream(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, StatusCode> {
    let connection = ClientConnection::new();
    let lines = echo_stream(request, connection.clone(), &state.config);
    let body = ConnectionBound::new("echo", &connection, lines).map(Ok::<_, Infallible>);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(body))
        .map_err(|e| {
            tracing::error!("Failed to build echo response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
