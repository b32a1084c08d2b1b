use std::fmt;
use std::str::FromStr;

use crate::Error;

pub const PUBLIC_KEY_LEN: usize = 32;

/// A 32-byte Nostr public key, carried as raw bytes and exchanged as hex.
///
/// Only the encoding is checked here; whether the bytes form a valid curve
/// point is a signing concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses exactly 64 hex characters. Anything else yields `None`.
    pub fn from_hex(value: &str) -> Option<Self> {
        if value.len() != PUBLIC_KEY_LEN * 2 {
            return None;
        }
        let mut bytes = [0u8; PUBLIC_KEY_LEN];
        hex::decode_to_slice(value, &mut bytes).ok()?;
        Some(Self(bytes))
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| Error::InvalidPublicKey(s.to_string()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}
