// Stream generators
//
// Each generator follows the same shape:
// 1. wait the configured delay (skipped before the first item)
// 2. stop if the client has disconnected
// 3. encode and yield one item
//
// A disconnect therefore suppresses every later item, terminal markers included.

mod counter;
mod echo;
mod generation;
mod progress;

pub use counter::counter_stream;
pub use echo::echo_stream;
pub use generation::{canned_response, generation_stream};
pub use progress::progress_stream;

use std::time::Duration;

/// Sleep between items; the first item of a stream is never delayed
async fn pace(index: usize, delay: Duration) {
    if index > 0 && delay > Duration::ZERO {
        tokio::time::sleep(delay).await;
    }
}
