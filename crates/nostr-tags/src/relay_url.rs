//! Relay URL validation and normalization.
//!
//! A relay hint is accepted when it:
//!
//! - uses the `wss://` or `ws://` scheme
//! - parses as a [`nostr::RelayUrl`]
//! - has a non-empty host
//! - is not a local host (localhost, loopback, private IPv4, `.local`)
//!   unless [`RelayUrlPolicy::allow_local`] is set
//! - is not a `.onion` host unless [`RelayUrlPolicy::allow_onion`] is set
//!
//! Accepted URLs are normalized: scheme and host lowercased, trailing slashes
//! removed. Validation is pure and never touches the network.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use tracing::trace;

use crate::config::RelayUrlPolicy;
use crate::Error;

/// A validated, normalized relay URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelayUrl(String);

impl RelayUrl {
    /// Validates with the default [`RelayUrlPolicy`].
    pub fn parse(url: &str) -> Result<Self, Error> {
        RelayUrlValidator::default().validate(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RelayUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RelayUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelayUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RelayUrlValidator {
    policy: RelayUrlPolicy,
}

impl RelayUrlValidator {
    pub fn new(policy: RelayUrlPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RelayUrlPolicy {
        &self.policy
    }

    pub fn validate(&self, url: &str) -> Result<RelayUrl, Error> {
        let url = url.trim();
        let invalid = |reason: &str| Error::InvalidRelayUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let lowered = url.to_ascii_lowercase();
        if !lowered.starts_with("wss://") && !lowered.starts_with("ws://") {
            return Err(invalid("scheme must be wss:// or ws://"));
        }

        let parsed = nostr::RelayUrl::parse(url)
            .map_err(|e| invalid(&format!("unparseable: {}", e)))?;

        let mut normalized = parsed.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }

        let host = extract_host(&normalized);
        if host.is_empty() {
            return Err(invalid("empty host"));
        }
        if !self.policy.allow_local && is_local_host(host) {
            return Err(invalid("local host not allowed"));
        }
        if !self.policy.allow_onion && host.ends_with(".onion") {
            return Err(invalid(".onion host not allowed"));
        }

        trace!(url = %normalized, "relay url accepted");
        Ok(RelayUrl(normalized))
    }
}

/// Host portion of a ws(s) URL without port, brackets kept for IPv6.
fn extract_host(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("wss://")
        .or_else(|| url.strip_prefix("ws://"))
        .unwrap_or(url);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);
    let authority = authority.rsplit('@').next().unwrap_or(authority);

    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }
    authority.split(':').next().unwrap_or(authority)
}

fn is_local_host(host: &str) -> bool {
    if host == "localhost" || host.ends_with(".localhost") || host.ends_with(".local") {
        return true;
    }
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => is_local_ipv4(ip),
        Ok(IpAddr::V6(ip)) => is_local_ipv6(ip),
        Err(_) => false,
    }
}

fn is_local_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_unspecified() || ip.is_private() || ip.is_link_local()
}

fn is_local_ipv6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fe80::/10
        || (first & 0xffc0) == 0xfe80
        // fc00::/7
        || (first & 0xfe00) == 0xfc00
        || ip.to_ipv4_mapped().is_some_and(is_local_ipv4)
}
