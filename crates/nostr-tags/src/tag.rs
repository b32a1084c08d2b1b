use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coordinates::EventCoordinates;
use crate::reference::{ReferenceKind, ReferenceTag};
use crate::Error;

/// A raw tag: `[name, value, ...other_parameters]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Tag {
    pub name: String,
    pub value: String,
    pub other_parameters: Vec<String>,
}

impl Tag {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        other_parameters: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            other_parameters,
        }
    }

    pub fn from_parts(parts: Vec<String>) -> Result<Self, Error> {
        if parts.len() < 2 {
            return Err(Error::MalformedTag(format!(
                "expected at least 2 elements, got {}",
                parts.len()
            )));
        }
        let mut parts = parts.into_iter();
        let name = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        Ok(Self {
            name,
            value,
            other_parameters: parts.collect(),
        })
    }

    pub fn to_parts(&self) -> Vec<String> {
        let mut parts = Vec::with_capacity(2 + self.other_parameters.len());
        parts.push(self.name.clone());
        parts.push(self.value.clone());
        parts.extend(self.other_parameters.iter().cloned());
        parts
    }

    /// Parses the JSON array wire form, e.g. `["p", "<hex>", "wss://relay"]`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn as_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_nostr_tag(&self) -> Result<nostr::Tag, Error> {
        Ok(nostr::Tag::parse(self.to_parts())?)
    }

    pub fn from_nostr_tag(tag: &nostr::Tag) -> Result<Self, Error> {
        Self::from_parts(tag.clone().to_vec())
    }
}

impl TryFrom<Vec<String>> for Tag {
    type Error = Error;

    fn try_from(parts: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_parts(parts)
    }
}

impl From<Tag> for Vec<String> {
    fn from(tag: Tag) -> Self {
        let mut parts = Vec::with_capacity(2 + tag.other_parameters.len());
        parts.push(tag.name);
        parts.push(tag.value);
        parts.extend(tag.other_parameters);
        parts
    }
}

/// Value of the first tag with the given name.
pub fn tag_value<'a>(tags: &'a [Tag], name: &str) -> Option<&'a str> {
    tags.iter()
        .find(|tag| tag.name == name)
        .map(|tag| tag.value.as_str())
}

/// Decodes every raw tag list, skipping the malformed ones.
pub fn parse_tags(raw: &[Vec<String>]) -> Vec<Tag> {
    raw.iter()
        .filter_map(|parts| match Tag::from_parts(parts.clone()) {
            Ok(tag) => Some(tag),
            Err(err) => {
                debug!(error = %err, "skipping malformed tag");
                None
            }
        })
        .collect()
}

pub fn event_references(tags: &[Tag]) -> impl Iterator<Item = ReferenceTag> + '_ {
    references_of(tags, ReferenceKind::Event)
}

pub fn pubkey_references(tags: &[Tag]) -> impl Iterator<Item = ReferenceTag> + '_ {
    references_of(tags, ReferenceKind::Pubkey)
}

fn references_of(tags: &[Tag], kind: ReferenceKind) -> impl Iterator<Item = ReferenceTag> + '_ {
    tags.iter()
        .filter_map(ReferenceTag::from_tag)
        .filter(move |reference| reference.kind == kind)
}

pub fn event_coordinates(tags: &[Tag]) -> impl Iterator<Item = EventCoordinates> + '_ {
    tags.iter()
        .filter_map(|tag| EventCoordinates::from_tag(tag.clone()))
}
