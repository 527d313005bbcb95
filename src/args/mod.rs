//! Fingerprint argument compiler
//!
//! Encodes a [`BrowserProfile`](crate::profile::BrowserProfile) into the
//! ordered command-line flag list a fingerprint-spoofing Chromium binary
//! expects. Pure and deterministic: the same profile always compiles to the
//! same argument list, which downstream process launches rely on.

use crate::profile::{BrowserProfile, ProxyMode, WebRtcMode};
use phf::phf_map;

/// Static OS-label to spoofed-platform mapping
///
/// Uses a compile-time hash map for O(1) lookup without runtime allocation.
static PLATFORM_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "Win 7" => "windows",
    "Win 8" => "windows",
    "Win 10" => "windows",
    "Win 11" => "windows",
    "Mac" => "macos",
    "Linux" => "linux",
};

/// Derive a fingerprint seed from a profile id
///
/// 32-bit signed accumulate over the decimal string form of the id
/// (`h = h * 31 + byte`, wrapping), absolute-valued. Stable across runs
/// and platforms; profiles without an explicit seed depend on this exact
/// derivation.
pub fn derive_seed(id: u64) -> u32 {
    let mut hash: i32 = 0;
    for byte in id.to_string().bytes() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(byte as i32);
    }
    hash.unsigned_abs()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Compile a profile into launch arguments, in fixed order:
/// seed, platform, GPU, CPU, timezone, language, proxy, WebRTC.
pub fn compile(profile: &BrowserProfile) -> Vec<String> {
    let mut args = Vec::new();

    let seed = profile
        .fingerprint_seed
        .filter(|&s| s != 0)
        .unwrap_or_else(|| derive_seed(profile.id));
    args.push(format!("--fingerprint={}", seed));

    let platform = profile
        .os
        .as_deref()
        .and_then(|os| PLATFORM_MAP.get(os).copied())
        .unwrap_or("windows");
    args.push(format!("--fingerprint-platform={}", platform));

    if let Some(webgl) = &profile.webgl {
        if let Some(vendor) = non_empty(&webgl.vendor) {
            args.push(format!("--fingerprint-gpu-vendor={}", vendor));
        }
        if let Some(renderer) = non_empty(&webgl.render) {
            args.push(format!("--fingerprint-gpu-renderer={}", renderer));
        }
    }

    if let Some(cores) = profile.cpu.as_ref().and_then(|c| c.value) {
        args.push(format!("--fingerprint-hardware-concurrency={}", cores));
    }

    if let Some(tz) = profile
        .time_zone
        .as_ref()
        .and_then(|t| non_empty(&t.utc))
    {
        args.push(format!("--timezone={}", tz));
    }

    if let Some(lang) = profile
        .ua_language
        .as_ref()
        .and_then(|l| non_empty(&l.language))
    {
        args.push(format!("--lang={}", lang));
    }

    if let Some(proxy) = &profile.proxy {
        match proxy.mode {
            ProxyMode::Custom => {
                if let Some(host) = non_empty(&proxy.host) {
                    let protocol = non_empty(&proxy.protocol)
                        .map(|p| p.to_lowercase())
                        .unwrap_or_else(|| "http".to_string());

                    let mut url = format!("{}://", protocol);
                    if let (Some(user), Some(pass)) =
                        (non_empty(&proxy.user), non_empty(&proxy.pass))
                    {
                        url.push_str(&format!("{}:{}@", user, pass));
                    }
                    match &proxy.port {
                        Some(port) => url.push_str(&format!("{}:{}", host, port)),
                        None => url.push_str(host),
                    }
                    args.push(format!("--proxy-server={}", url));
                }
            }
            ProxyMode::Direct => {
                args.push("--proxy-server=direct://".to_string());
            }
            ProxyMode::System => {}
        }
    }

    if let Some(webrtc) = &profile.webrtc {
        match webrtc.mode {
            WebRtcMode::Disabled => args.push("--disable-webrtc".to_string()),
            WebRtcMode::ProxyOnly => args.push("--disable-non-proxied-udp".to_string()),
            WebRtcMode::Allow => {}
        }
    }

    args
}

#[cfg(test)]
mod tests;
