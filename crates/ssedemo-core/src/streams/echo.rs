// POST echo stream
//
// Unlike the other generators this one produces raw `data: <json>\n\n` lines
// with no event name; the demo client reads them with fetch + ReadableStream.

use futures::stream::{self, Stream};
use serde::Serialize;

use super::pace;
use crate::config::StreamConfig;
use crate::connection::ClientConnection;
use crate::error::{Result, StreamError};
use crate::schemas::{ChatRequest, EchoChunk, EchoComplete, EchoFailure};

/// Written if even the failure payload cannot be encoded
const FALLBACK_FAILURE_LINE: &str = "data: {\"error\":\"Processing failed\"}\n\n";

enum EchoState {
    Emitting(usize),
    Finished,
}

/// Acknowledgement text for a submitted message
fn acknowledgement(message: &str) -> String {
    format!("Processing your message: '{}'", message)
}

/// Encode a payload as a single `data:` line
fn data_line<T: Serialize>(kind: &'static str, payload: &T) -> Result<String> {
    let json = serde_json::to_string(payload).map_err(|e| StreamError::encode(kind, e))?;
    Ok(format!("data: {}\n\n", json))
}

/// Line reporting that processing failed
fn failure_line(err: &StreamError) -> String {
    data_line("echo failure", &EchoFailure::new(err))
        .unwrap_or_else(|_| FALLBACK_FAILURE_LINE.to_string())
}

/// Echo the words of `request.message` back, one line per word
pub fn echo_stream(
    request: ChatRequest,
    connection: ClientConnection,
    config: &StreamConfig,
) -> impl Stream<Item = String> + Send + 'static {
    let words: Vec<String> = request
        .message
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let acknowledgement = acknowledgement(&request.message);
    let user_id = request.user_id;
    let interval = config.echo_interval;

    tracing::info!(
        user_id = %user_id,
        words = words.len(),
        "{}",
        acknowledgement
    );

    stream::unfold(EchoState::Emitting(0), move |state| {
        let connection = connection.clone();
        let line = match state {
            EchoState::Finished => None,
            EchoState::Emitting(index) => Some((
                index,
                next_line(&words, index, &user_id, &acknowledgement),
            )),
        };
        async move {
            let (index, line) = line?;

            pace(index, interval).await;

            if connection.is_disconnected() {
                tracing::debug!(sent = index, "Client disconnected, stopping echo stream");
                return None;
            }

            match line {
                Ok((line, true)) => Some((line, EchoState::Emitting(index + 1))),
                Ok((line, false)) => {
                    tracing::debug!(chunks = index, "Echo stream completed");
                    Some((line, EchoState::Finished))
                }
                Err(e) => {
                    tracing::error!("Echo stream failed: {}", e);
                    Some((failure_line(&e), EchoState::Finished))
                }
            }
        }
    })
}

/// The line at `index` and whether more lines follow it
fn next_line(
    words: &[String],
    index: usize,
    user_id: &str,
    acknowledgement: &str,
) -> Result<(String, bool)> {
    match words.get(index) {
        Some(word) => {
            let chunk = EchoChunk {
                chunk: format!("{} ", word),
                index,
                user_id: user_id.to_string(),
            };
            Ok((data_line("echo chunk", &chunk)?, true))
        }
        None => {
            let complete = EchoComplete {
                complete: true,
                message: "Processing completed".to_string(),
                acknowledgement: acknowledgement.to_string(),
            };
            Ok((data_line("echo completion", &complete)?, false))
        }
    }
}
