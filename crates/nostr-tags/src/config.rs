use std::env;

pub const ENV_ALLOW_LOCAL: &str = "NOSTR_TAGS_ALLOW_LOCAL";
pub const ENV_ALLOW_ONION: &str = "NOSTR_TAGS_ALLOW_ONION";

/// Which relay hosts the validator accepts beyond public DNS names and IPs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayUrlPolicy {
    /// Accept localhost, loopback, private IPv4 ranges and `.local` hosts.
    pub allow_local: bool,
    /// Accept Tor `.onion` hosts.
    pub allow_onion: bool,
}

impl Default for RelayUrlPolicy {
    fn default() -> Self {
        Self {
            allow_local: false,
            allow_onion: true,
        }
    }
}

impl RelayUrlPolicy {
    /// Reads overrides from the environment, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allow_local: env_flag(ENV_ALLOW_LOCAL).unwrap_or(defaults.allow_local),
            allow_onion: env_flag(ENV_ALLOW_ONION).unwrap_or(defaults.allow_onion),
        }
    }

    pub fn permissive() -> Self {
        Self {
            allow_local: true,
            allow_onion: true,
        }
    }
}

fn env_flag(var: &str) -> Option<bool> {
    let value = env::var(var).ok()?;
    parse_flag(&value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
