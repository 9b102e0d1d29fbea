//! Client IP resolution.
//!
//! # Precedence
//! 1. `X-Real-IP`, if it parses as an IPv4/IPv6 address
//! 2. Forwarding chain, first parseable entry left to right:
//!    `X-Forwarded-For`, then the legacy `X-Forward-For` spelling
//! 3. The TCP peer address with its port stripped
//!
//! Headers are caller-controlled; the result is suitable for logging only.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

pub const X_REAL_IP: &str = "x-real-ip";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_FORWARD_FOR: &str = "x-forward-for";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no valid client ip found (remote address '{remote_addr}')")]
pub struct ClientIpError {
    pub remote_addr: String,
}

/// Resolve the best-guess originating IP of a request.
///
/// `remote_addr` is the peer address in `host:port` form; an empty string
/// means the connection address is unknown.
pub fn resolve_client_ip(headers: &HeaderMap, remote_addr: &str) -> Result<IpAddr, ClientIpError> {
    if let Some(ip) = header_str(headers, X_REAL_IP).and_then(|v| v.parse().ok()) {
        return Ok(ip);
    }

    for name in [X_FORWARDED_FOR, X_FORWARD_FOR] {
        let chain = headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','));
        if let Some(ip) = chain.filter_map(|entry| entry.trim().parse().ok()).next() {
            return Ok(ip);
        }
    }

    remote_addr
        .parse::<SocketAddr>()
        .map(|addr| addr.ip())
        .map_err(|_| ClientIpError {
            remote_addr: remote_addr.to_string(),
        })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
