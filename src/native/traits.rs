//! Native channel trait
//!
//! Defines the seam to the host application's inter-process call mechanism.

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Host-provided inter-process call channel
///
/// Calls are fire-and-forget: `args[0]` carries the correlation token and the
/// host delivers the response asynchronously through
/// [`CallbackRegistry::deliver`](super::CallbackRegistry::deliver).
#[async_trait]
pub trait NativeChannel: Send + Sync + std::fmt::Debug {
    /// Issue a host call
    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<()>;

    /// Whether the host channel is usable
    fn is_available(&self) -> bool;
}
