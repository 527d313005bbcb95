//! Mock native channel for testing
//!
//! Simulates the host application's IPC mechanism: invocations are recorded
//! and a canned response is delivered back through the shared
//! [`CallbackRegistry`] after an optional delay.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::registry::CallbackRegistry;
use super::traits::NativeChannel;
use crate::{Error, Result};

/// Mock native channel
#[derive(Debug)]
pub struct MockNativeChannel {
    /// Registry responses are delivered into
    registry: Arc<CallbackRegistry>,
    /// Per-method response overrides
    responses: Mutex<std::collections::HashMap<String, Value>>,
    /// Delay before delivering a response
    delay: Duration,
    /// When set, invocations are accepted but never answered
    silent: AtomicBool,
    /// Recorded invocations (method, args)
    invocations: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockNativeChannel {
    /// Create a mock channel delivering into `registry`
    pub fn new(registry: Arc<CallbackRegistry>) -> Self {
        Self {
            registry,
            responses: Mutex::new(std::collections::HashMap::new()),
            delay: Duration::from_millis(0),
            silent: AtomicBool::new(false),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Delay response delivery
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Stop answering calls (for timeout tests)
    pub fn set_silent(&self, silent: bool) {
        self.silent.store(silent, Ordering::SeqCst);
    }

    /// Override the canned response for a method
    pub async fn set_response(&self, method: &str, value: Value) {
        let mut responses = self.responses.lock().await;
        responses.insert(method.to_string(), value);
    }

    /// Recorded invocations so far
    pub async fn invocations(&self) -> Vec<(String, Vec<Value>)> {
        self.invocations.lock().await.clone()
    }

    fn default_response(method: &str) -> Value {
        match method {
            "getBrowserList" => serde_json::json!({ "users": [] }),
            "getRuningBrowser" => serde_json::json!([]),
            "getGlobalData" => serde_json::json!("{}"),
            "getBrowserVersion" => serde_json::json!("139.0.0.0"),
            "checkProxy" => serde_json::json!(true),
            "launchBrowser" => serde_json::json!({ "success": true }),
            _ => serde_json::json!("ok"),
        }
    }
}

#[async_trait]
impl NativeChannel for MockNativeChannel {
    async fn invoke(&self, method: &str, args: Vec<Value>) -> Result<()> {
        let token = args
            .first()
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::internal("native call without correlation token"))?
            .to_string();

        {
            let mut invocations = self.invocations.lock().await;
            invocations.push((method.to_string(), args.clone()));
        }

        if self.silent.load(Ordering::SeqCst) {
            return Ok(());
        }

        let response = {
            let responses = self.responses.lock().await;
            responses
                .get(method)
                .cloned()
                .unwrap_or_else(|| Self::default_response(method))
        };

        let registry = Arc::clone(&self.registry);
        let delay = self.delay;
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            registry.deliver(&token, response).await;
        });

        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}
