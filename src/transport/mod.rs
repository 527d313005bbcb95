//! Transport selection
//!
//! One-shot environment check deciding, at construction time, whether
//! commands travel over the host's native channel or the local launcher's
//! REST service. The result is fixed for the life of the process; a host
//! environment cannot change transport mid-session.

use crate::native::NativeChannel;
use std::sync::Arc;
use tracing::info;

/// Which back end carries dispatched commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Host-provided inter-process channel
    Native,
    /// Local launcher REST service
    Remote,
}

/// One-shot transport probe
///
/// Absence of a native channel is not an error, it is the normal Remote
/// branch. Detection never fails.
#[derive(Debug)]
pub struct TransportProbe {
    kind: TransportKind,
}

impl TransportProbe {
    /// Probe once against an optionally supplied native channel
    pub fn detect(channel: Option<&Arc<dyn NativeChannel>>) -> Self {
        let kind = match channel {
            Some(ch) if ch.is_available() => TransportKind::Native,
            _ => TransportKind::Remote,
        };

        info!(
            "Transport: {}",
            match kind {
                TransportKind::Native => "native host channel",
                TransportKind::Remote => "launcher REST service",
            }
        );

        Self { kind }
    }

    /// The cached result of the probe
    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn is_native(&self) -> bool {
        self.kind == TransportKind::Native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{CallbackRegistry, MockNativeChannel};

    #[test]
    fn test_no_channel_means_remote() {
        let probe = TransportProbe::detect(None);
        assert_eq!(probe.kind(), TransportKind::Remote);
        assert!(!probe.is_native());
    }

    #[tokio::test]
    async fn test_available_channel_means_native() {
        let registry = std::sync::Arc::new(CallbackRegistry::new());
        let channel: Arc<dyn NativeChannel> = Arc::new(MockNativeChannel::new(registry));
        let probe = TransportProbe::detect(Some(&channel));
        assert_eq!(probe.kind(), TransportKind::Native);
    }
}
