//! Client identification utilities.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Determine the caller's IP address.
///
/// Prefers the first entry of `X-Forwarded-For` (reverse proxy setups),
/// falling back to the direct connection address.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = xff.split(',').next() {
            if let Ok(ip) = first.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}
