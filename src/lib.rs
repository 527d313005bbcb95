//! Virtual-Bridge: control-plane bridge for fingerprint-spoofing browsers
//!
//! This library lets a management application issue abstract browser control
//! commands against one of two interchangeable back ends: a native
//! inter-process channel exposed by a host application, or a local REST
//! service that manages browser process instances.

pub mod config;
pub mod error;

pub mod args;
pub mod dispatch;
pub mod launcher;
pub mod native;
pub mod profile;
pub mod store;
pub mod transport;

// Re-exports
pub use error::{Error, Result};

/// Virtual-Bridge library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
