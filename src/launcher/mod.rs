//! Launcher REST client
//!
//! Thin client for the local launcher service that manages browser process
//! instances. Paths and methods are fixed by the launcher's API surface:
//!
//! | operation    | method | path             |
//! |--------------|--------|------------------|
//! | launch       | POST   | /api/launch      |
//! | stop         | POST   | /api/stop/{id}   |
//! | list running | GET    | /api/running     |
//! | status       | GET    | /api/status      |
//! | get config   | GET    | /api/config      |
//! | set config   | POST   | /api/config      |

use crate::profile::BrowserProfile;
use crate::Result;
use serde_json::Value;
use tracing::debug;

/// HTTP client for the local launcher service
#[derive(Debug, Clone)]
pub struct LauncherClient {
    /// Base URL, e.g. "http://localhost:9528"
    base_url: String,
    client: reqwest::Client,
}

impl LauncherClient {
    /// Create a client against `base_url`
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Launch a browser instance from a full profile
    pub async fn launch(&self, profile: &BrowserProfile) -> Result<Value> {
        debug!("POST /api/launch (profile {})", profile.id);
        let response = self
            .client
            .post(self.url("/api/launch"))
            .json(profile)
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }

    /// Stop a running instance (best-effort at the call sites)
    pub async fn stop(&self, id: u64) -> Result<Value> {
        debug!("POST /api/stop/{}", id);
        let response = self
            .client
            .post(self.url(&format!("/api/stop/{}", id)))
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }

    /// List ids of running instances
    pub async fn running(&self) -> Result<Value> {
        debug!("GET /api/running");
        let response = self
            .client
            .get(self.url("/api/running"))
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }

    /// Per-instance state map
    pub async fn status(&self) -> Result<Value> {
        debug!("GET /api/status");
        let response = self
            .client
            .get(self.url("/api/status"))
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }

    /// Fetch the launcher's own configuration
    pub async fn get_config(&self) -> Result<Value> {
        debug!("GET /api/config");
        let response = self
            .client
            .get(self.url("/api/config"))
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }

    /// Update the launcher's own configuration
    pub async fn set_config(&self, config: &Value) -> Result<Value> {
        debug!("POST /api/config");
        let response = self
            .client
            .post(self.url("/api/config"))
            .json(config)
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = LauncherClient::new("http://localhost:9528");
        assert_eq!(client.url("/api/launch"), "http://localhost:9528/api/launch");
        assert_eq!(client.url("/api/stop/7"), "http://localhost:9528/api/stop/7");
    }
}
