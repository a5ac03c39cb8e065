// Simulated text generation: one "llm_chunk" per word, then "llm_complete"

use futures::stream::{self, Stream};

use super::pace;
use crate::config::StreamConfig;
use crate::connection::ClientConnection;
use crate::error::Result;
use crate::event::{StreamEvent, EVENT_LLM_CHUNK, EVENT_LLM_COMPLETE};
use crate::schemas::{ChunkMetadata, CompletionNotice, GenerationChunk};

/// Canned response text following the line that quotes the prompt
const RESPONSE_BODY: &str = "\
This streaming response demonstrates how you can implement real-time text generation
similar to ChatGPT or other language models. Each chunk of text is sent as it becomes
available, providing a better user experience than waiting for the complete response.

The streaming approach is particularly useful for:
1. Long-form content generation
2. Real-time chat applications
3. Progressive content delivery
4. Better perceived performance

This completes the simulated streaming response.";

/// Full simulated response for a prompt
///
/// The prompt only appears in the first line; the rest is fixed.
pub fn canned_response(prompt: &str) -> String {
    format!(
        "This is a simulated LLM response to your prompt: \"{}\".\n\n{}",
        prompt, RESPONSE_BODY
    )
}

/// Stream the canned response word by word
pub fn generation_stream(
    prompt: &str,
    connection: ClientConnection,
    config: &StreamConfig,
) -> impl Stream<Item = StreamEvent> + Send + 'static {
    let words: Vec<String> = canned_response(prompt)
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let interval = config.chunk_interval;

    tracing::debug!(words = words.len(), "Starting generation stream");

    stream::unfold(0usize, move |index| {
        let connection = connection.clone();
        let total = words.len();
        let item = words.get(index).cloned();
        async move {
            if index > total {
                return None;
            }

            pace(index, interval).await;

            if connection.is_disconnected() {
                tracing::debug!(sent = index, total, "Client disconnected, stopping generation stream");
                return None;
            }

            let event = match item {
                Some(word) => chunk_event(word, index, total),
                None => {
                    tracing::info!(chunks = total, "Generation stream completed");
                    StreamEvent::json(
                        EVENT_LLM_COMPLETE,
                        total + 1,
                        &CompletionNotice::new("LLM response completed"),
                    )
                }
            };

            match event {
                Ok(event) => Some((event, index + 1)),
                Err(e) => {
                    tracing::error!("Failed to encode generation event: {}", e);
                    None
                }
            }
        }
    })
}

fn chunk_event(word: String, index: usize, total: usize) -> Result<StreamEvent> {
    let chunk_id = index + 1;
    let chunk = GenerationChunk {
        content: format!("{} ", word),
        chunk_id: chunk_id as u32,
        is_final: chunk_id == total,
        metadata: Some(ChunkMetadata {
            progress: progress_percent(chunk_id, total),
        }),
    };
    StreamEvent::json(EVENT_LLM_CHUNK, chunk_id, &chunk)
}

/// round(done / total * 100), exact halves rounded to the even neighbour
fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let quotient = done * 100 / total;
    let twice_remainder = 2 * (done * 100 % total);
    let rounded = if twice_remainder > total || (twice_remainder == total && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded.min(100) as u8
}
