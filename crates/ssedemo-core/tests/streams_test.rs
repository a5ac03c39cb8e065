// Integration tests for the stream generators
//
// These tests drive all four generators through the public API and check the
// properties shared between them: disconnect handling and repeatability.

use futures::{Stream, StreamExt};
use ssedemo_core::{
    canned_response, counter_stream, echo_stream, generation_stream, progress_stream,
    ChatRequest, ClientConnection, GenerationChunk, ProgressUpdate, StreamConfig, StreamEvent,
};

/// Pull `before` items, disconnect, then drain whatever is left
async fn disconnect_after<S, T>(stream: S, connection: &ClientConnection, before: usize) -> (usize, usize)
where
    S: Stream<Item = T>,
{
    let mut stream = Box::pin(stream);
    let mut received = 0;
    for _ in 0..before {
        if stream.next().await.is_some() {
            received += 1;
        }
    }
    connection.disconnect();
    let after = stream.collect::<Vec<_>>().await.len();
    (received, after)
}

fn shape(events: &[StreamEvent]) -> Vec<(&'static str, String)> {
    events.iter().map(|e| (e.event, e.id.clone())).collect()
}

// =============================================================================
// Disconnect before iteration k yields exactly k-1 events
// =============================================================================

#[tokio::test]
async fn test_counter_disconnect_before_each_iteration() {
    for k in 1..=11 {
        let connection = ClientConnection::new();
        let stream = counter_stream(connection.clone(), &StreamConfig::immediate());
        let (received, after) = disconnect_after(stream, &connection, k - 1).await;
        assert_eq!(received, k - 1, "k = {}", k);
        assert_eq!(after, 0, "k = {}", k);
    }
}

#[tokio::test]
async fn test_generation_disconnect_before_each_iteration() {
    let total = canned_response("prompt").split_whitespace().count() + 1;
    for k in [1, 2, total / 2, total] {
        let connection = ClientConnection::new();
        let stream = generation_stream("prompt", connection.clone(), &StreamConfig::immediate());
        let (received, after) = disconnect_after(stream, &connection, k - 1).await;
        assert_eq!(received, k - 1, "k = {}", k);
        assert_eq!(after, 0, "k = {}", k);
    }
}

#[tokio::test]
async fn test_progress_disconnect_before_each_iteration() {
    for k in 1..=21 {
        let connection = ClientConnection::new();
        let stream = progress_stream("task", connection.clone(), &StreamConfig::immediate());
        let (received, after) = disconnect_after(stream, &connection, k - 1).await;
        assert_eq!(received, k - 1, "k = {}", k);
        assert_eq!(after, 0, "k = {}", k);
    }
}

#[tokio::test]
async fn test_echo_disconnect_before_each_iteration() {
    for k in 1..=4 {
        let connection = ClientConnection::new();
        let request = ChatRequest {
            message: "one two three".to_string(),
            user_id: "anonymous".to_string(),
        };
        let stream = echo_stream(request, connection.clone(), &StreamConfig::immediate());
        let (received, after) = disconnect_after(stream, &connection, k - 1).await;
        assert_eq!(received, k - 1, "k = {}", k);
        assert_eq!(after, 0, "k = {}", k);
    }
}

#[tokio::test]
async fn test_disconnect_before_first_item_yields_nothing() {
    let connection = ClientConnection::new();
    connection.disconnect();

    let config = StreamConfig::immediate();
    assert_eq!(counter_stream(connection.clone(), &config).count().await, 0);
    assert_eq!(generation_stream("p", connection.clone(), &config).count().await, 0);
    assert_eq!(progress_stream("t", connection.clone(), &config).count().await, 0);
    let request = ChatRequest {
        message: "hello".to_string(),
        user_id: "anonymous".to_string(),
    };
    assert_eq!(echo_stream(request, connection, &config).count().await, 0);
}

// =============================================================================
// Repeated invocations are independent and identically shaped
// =============================================================================

#[tokio::test]
async fn test_streams_are_repeatable() {
    let config = StreamConfig::immediate();

    let first: Vec<StreamEvent> = counter_stream(ClientConnection::new(), &config).collect().await;
    let second: Vec<StreamEvent> = counter_stream(ClientConnection::new(), &config).collect().await;
    assert_eq!(shape(&first), shape(&second));

    let first: Vec<StreamEvent> = generation_stream("same", ClientConnection::new(), &config)
        .collect()
        .await;
    let second: Vec<StreamEvent> = generation_stream("same", ClientConnection::new(), &config)
        .collect()
        .await;
    assert_eq!(first, second);

    let first: Vec<StreamEvent> = progress_stream("job", ClientConnection::new(), &config)
        .collect()
        .await;
    let second: Vec<StreamEvent> = progress_stream("job", ClientConnection::new(), &config)
        .collect()
        .await;
    assert_eq!(shape(&first), shape(&second));
    let a: Vec<u8> = first
        .iter()
        .map(|e| e.payload::<ProgressUpdate>().unwrap().progress)
        .collect();
    let b: Vec<u8> = second
        .iter()
        .map(|e| e.payload::<ProgressUpdate>().unwrap().progress)
        .collect();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_concurrent_streams_do_not_share_state() {
    let config = StreamConfig::immediate();
    let left = ClientConnection::new();
    let right = ClientConnection::new();

    let mut left_stream = Box::pin(generation_stream("left", left.clone(), &config));
    let right_stream = generation_stream("right", right.clone(), &config);

    left_stream.next().await.unwrap();
    left.disconnect();
    assert!(left_stream.next().await.is_none());

    let right_events: Vec<StreamEvent> = right_stream.collect().await;
    let finals = right_events
        .iter()
        .filter(|e| e.event == "llm_chunk")
        .filter(|e| e.payload::<GenerationChunk>().unwrap().is_final)
        .count();
    assert_eq!(finals, 1);
    assert_eq!(right_events.last().unwrap().event, "llm_complete");
}
