// Client connection handle
//
// Generators poll `is_disconnected` once per iteration instead of relying on
// being dropped, so the same loop works whether the stream is driven inline
// by hyper or from a spawned task.

use tokio_util::sync::{CancellationToken, DropGuard};

/// Per-request view of whether the peer is still listening
#[derive(Debug, Clone, Default)]
pub struct ClientConnection {
    token: CancellationToken,
}

impl ClientConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the client has gone away
    pub fn is_disconnected(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Mark the client as disconnected
    pub fn disconnect(&self) {
        self.token.cancel();
    }

    /// Guard that marks the client disconnected when dropped
    ///
    /// Held by the response body so that hyper dropping the body on a closed
    /// socket is observed by the generator.
    pub fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }
}
