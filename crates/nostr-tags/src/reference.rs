use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tag::Tag;
use crate::Error;

pub const EVENT_REFERENCE: &str = "e";
pub const PUBKEY_REFERENCE: &str = "p";

/// What a reference tag points at.
///
/// Discriminators other than `e` and `p` are kept as [`ReferenceKind::Unknown`]
/// instead of being rejected. Callers that want the legacy behaviour of
/// treating them as event references can use [`ReferenceKind::resolved`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Event,
    Pubkey,
    Unknown(String),
}

impl ReferenceKind {
    pub fn parse(value: &str) -> Self {
        match value {
            EVENT_REFERENCE => Self::Event,
            PUBKEY_REFERENCE => Self::Pubkey,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Event => EVENT_REFERENCE,
            Self::Pubkey => PUBKEY_REFERENCE,
            Self::Unknown(raw) => raw,
        }
    }

    /// Collapses unknown discriminators into [`ReferenceKind::Event`].
    pub fn resolved(&self) -> Self {
        match self {
            Self::Pubkey => Self::Pubkey,
            Self::Event | Self::Unknown(_) => Self::Event,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

/// `["e"|"p", <id>, <relay-url>?]`. Neither the id nor the relay hint is
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ReferenceTag {
    pub kind: ReferenceKind,
    pub target_id: String,
    pub recommended_relay_url: Option<String>,
}

impl ReferenceTag {
    pub fn new(
        kind: ReferenceKind,
        target_id: impl Into<String>,
        recommended_relay_url: Option<String>,
    ) -> Self {
        Self {
            kind,
            target_id: target_id.into(),
            recommended_relay_url,
        }
    }

    pub fn decode(parts: &[String]) -> Result<Self, Error> {
        let (discriminator, target_id) = match parts {
            [discriminator, target_id, ..] => (discriminator, target_id),
            _ => {
                return Err(Error::MalformedTag(format!(
                    "reference tag needs a kind and a target id, got {} elements",
                    parts.len()
                )))
            }
        };
        Ok(Self {
            kind: ReferenceKind::parse(discriminator),
            target_id: target_id.clone(),
            recommended_relay_url: parts.get(2).cloned(),
        })
    }

    /// Lenient form of [`ReferenceTag::decode`] over an already parsed tag.
    pub fn from_tag(tag: &Tag) -> Option<Self> {
        match Self::decode(&tag.to_parts()) {
            Ok(reference) => Some(reference),
            Err(err) => {
                debug!(error = %err, "not a reference tag");
                None
            }
        }
    }

    pub fn encode(&self) -> Vec<String> {
        let mut parts = vec![self.kind.as_str().to_string(), self.target_id.clone()];
        if let Some(relay) = &self.recommended_relay_url {
            parts.push(relay.clone());
        }
        parts
    }

    pub fn to_tag(&self) -> Tag {
        Tag::new(
            self.kind.as_str(),
            self.target_id.clone(),
            self.recommended_relay_url.iter().cloned().collect(),
        )
    }
}

impl TryFrom<&[String]> for ReferenceTag {
    type Error = Error;

    fn try_from(parts: &[String]) -> Result<Self, Self::Error> {
        Self::decode(parts)
    }
}

impl TryFrom<Vec<String>> for ReferenceTag {
    type Error = Error;

    fn try_from(parts: Vec<String>) -> Result<Self, Self::Error> {
        Self::decode(&parts)
    }
}

impl From<ReferenceTag> for Vec<String> {
    fn from(reference: ReferenceTag) -> Self {
        reference.encode()
    }
}
