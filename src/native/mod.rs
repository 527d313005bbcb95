//! Native channel layer
//!
//! Everything that touches the host application's asynchronous IPC mechanism:
//! the channel trait, the callback registry that correlates responses with
//! their originating calls, and a mock channel for tests.
//!
//! The host protocol has no error callback: a native call either resolves
//! with a value or is abandoned by the dispatcher's timeout race.

pub mod mock;
pub mod registry;
pub mod traits;

pub use mock::MockNativeChannel;
pub use registry::CallbackRegistry;
pub use traits::NativeChannel;

#[cfg(test)]
mod tests;
