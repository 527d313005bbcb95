//! Unified error types for Virtual-Bridge

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Virtual-Bridge
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP errors contacting the launcher service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Native call exceeded its deadline
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Transport failure on the native channel or launcher service
    #[error("Transport error: {0}")]
    Transport(String),

    /// Launch referenced a profile id absent from the store
    #[error("Profile not found: {0}")]
    ProfileNotFound(u64),

    /// Persisted JSON was malformed or of the wrong shape
    #[error("Corrupt persisted state: {0}")]
    CorruptState(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a new corrupt state error
    pub fn corrupt_state<S: Into<String>>(msg: S) -> Self {
        Error::CorruptState(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }
}
