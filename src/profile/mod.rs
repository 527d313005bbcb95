//! Browser identity profile data model
//!
//! These types mirror the persisted profile JSON consumed by the launcher
//! service and the native host. Unmodelled fields are carried through a
//! flattened map so whole-record replacement never drops them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A browser identity profile to be spoofed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserProfile {
    /// Unique positive id, allocated as max(existing) + 1
    #[serde(default)]
    pub id: u64,

    /// Display name, defaulted from a prefix plus the id when absent
    #[serde(default)]
    pub name: String,

    /// Operating-system label ("Win 10", "Mac", "Linux", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// GPU vendor/renderer block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webgl: Option<WebGlConfig>,

    /// Logical CPU core count block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuConfig>,

    /// IANA timezone block
    #[serde(
        rename = "time-zone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_zone: Option<TimeZoneConfig>,

    /// UI language block
    #[serde(
        rename = "ua-language",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ua_language: Option<LanguageConfig>,

    /// Proxy settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,

    /// WebRTC policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webrtc: Option<WebRtcConfig>,

    /// Explicit fingerprint seed; derived from the id when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint_seed: Option<u32>,

    /// Fields this bridge does not interpret (screen, canvas, audio, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Profile group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// GPU identity block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebGlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Renderer string (wire field name is "render")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Logical CPU core count block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpuConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Timezone block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeZoneConfig {
    /// IANA timezone identifier (wire field name is "utc")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// UI language block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub mode: ProxyMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Proxy port; the store holds both numeric and string forms in the wild
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Port {
    Number(u16),
    Text(String),
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{}", n),
            Port::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Proxy mode, stored as its integer wire value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ProxyMode {
    /// System default proxy
    #[default]
    System,
    /// No proxy (direct://)
    Direct,
    /// Custom proxy from host/port/credentials
    Custom,
}

impl From<u8> for ProxyMode {
    fn from(v: u8) -> Self {
        match v {
            1 => ProxyMode::Direct,
            2 => ProxyMode::Custom,
            _ => ProxyMode::System,
        }
    }
}

impl From<ProxyMode> for u8 {
    fn from(mode: ProxyMode) -> u8 {
        match mode {
            ProxyMode::System => 0,
            ProxyMode::Direct => 1,
            ProxyMode::Custom => 2,
        }
    }
}

/// WebRTC policy block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebRtcConfig {
    #[serde(default)]
    pub mode: WebRtcMode,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// WebRTC policy mode, stored as its integer wire value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum WebRtcMode {
    /// Route candidates through the proxy, no raw UDP
    #[default]
    ProxyOnly,
    /// Leave WebRTC untouched
    Allow,
    /// Disable WebRTC entirely
    Disabled,
}

impl From<u8> for WebRtcMode {
    fn from(v: u8) -> Self {
        match v {
            0 => WebRtcMode::ProxyOnly,
            2 => WebRtcMode::Disabled,
            _ => WebRtcMode::Allow,
        }
    }
}

impl From<WebRtcMode> for u8 {
    fn from(mode: WebRtcMode) -> u8 {
        match mode {
            WebRtcMode::ProxyOnly => 0,
            WebRtcMode::Allow => 1,
            WebRtcMode::Disabled => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trip_preserves_unknown_fields() {
        let raw = serde_json::json!({
            "id": 3,
            "name": "work",
            "os": "Win 11",
            "webgl": { "mode": 1, "vendor": "Intel" },
            "screen": { "mode": 0, "width": 1920, "height": 1080 },
        });

        let profile: BrowserProfile = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(profile.id, 3);
        assert!(profile.extra.contains_key("screen"));

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["screen"]["width"], 1920);
        assert_eq!(back["webgl"]["mode"], 1);
        assert_eq!(back["webgl"]["vendor"], "Intel");
    }

    #[test]
    fn test_proxy_mode_wire_values() {
        let proxy: ProxyConfig =
            serde_json::from_value(serde_json::json!({ "mode": 2, "host": "1.2.3.4" })).unwrap();
        assert_eq!(proxy.mode, ProxyMode::Custom);

        let back = serde_json::to_value(&proxy).unwrap();
        assert_eq!(back["mode"], 2);
    }

    #[test]
    fn test_unknown_modes_fall_back() {
        assert_eq!(ProxyMode::from(9), ProxyMode::System);
        assert_eq!(WebRtcMode::from(9), WebRtcMode::Allow);
    }

    #[test]
    fn test_port_accepts_number_and_text() {
        let a: Port = serde_json::from_value(serde_json::json!(8080)).unwrap();
        let b: Port = serde_json::from_value(serde_json::json!("8080")).unwrap();
        assert_eq!(a.to_string(), "8080");
        assert_eq!(b.to_string(), "8080");
    }
}
