//! Client identity used as the rate limit key.

use axum::http::HeaderMap;
use std::fmt;
use std::net::SocketAddr;

/// Who is making the request, as far as transport hints tell.
///
/// Taken as-is from headers. Not validated, so a client that controls
/// `X-Forwarded-For` controls its own key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    /// Used when no hint is available.
    pub const UNKNOWN: &'static str = "unknown";

    /// Derive the identity from, in order: the head of `X-Forwarded-For`,
    /// `X-Real-IP`, the peer address.
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        first_value(headers, "x-forwarded-for")
            .or_else(|| first_value(headers, "x-real-ip"))
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .map(Self)
            .unwrap_or_else(|| Self(Self::UNKNOWN.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
