//! Callback registry
//!
//! Correlates asynchronous native responses with their originating calls.
//! Every pending call is keyed by a unique token and removed exactly once:
//! either by a genuine delivery or by the dispatcher discarding it on timeout.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};
use uuid::Uuid;

/// Pending native call
#[derive(Debug)]
struct PendingCall {
    /// Response channel sender
    sender: oneshot::Sender<Value>,
    /// Call method (for logging)
    method: String,
}

/// Token-keyed table of pending native calls
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    pending: Mutex<HashMap<String, PendingCall>>,
}

impl CallbackRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a correlation token, unique per outstanding call by construction
    pub fn next_token() -> String {
        format!("callback_{}", Uuid::new_v4())
    }

    /// Store a resolver under `token` and return the receiving half
    pub async fn register(&self, token: &str, method: &str) -> oneshot::Receiver<Value> {
        let (sender, receiver) = oneshot::channel();
        let mut pending = self.pending.lock().await;
        pending.insert(
            token.to_string(),
            PendingCall {
                sender,
                method: method.to_string(),
            },
        );
        receiver
    }

    /// Deliver a host response for `token`
    ///
    /// Returns `true` if a pending call was resolved. Deliveries for unknown
    /// tokens (already resolved or timed out) are dropped; this is the safe
    /// no-op the timeout path relies on.
    pub async fn deliver(&self, token: &str, value: Value) -> bool {
        let mut pending = self.pending.lock().await;

        match pending.remove(token) {
            Some(call) => {
                debug!("Delivering response for {} ({})", token, call.method);
                // The receiver may already be gone; that is equally a no-op.
                let _ = call.sender.send(value);
                true
            }
            None => {
                debug!("Dropping delivery for unknown token {}", token);
                false
            }
        }
    }

    /// Remove a pending call without resolving it
    ///
    /// Invoked when the timeout wins the race; a later delivery for the same
    /// token then finds nothing and is dropped.
    pub async fn discard(&self, token: &str) -> bool {
        let mut pending = self.pending.lock().await;
        match pending.remove(token) {
            Some(call) => {
                warn!("Discarding pending call {} ({})", token, call.method);
                true
            }
            None => false,
        }
    }

    /// Number of outstanding calls
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}
