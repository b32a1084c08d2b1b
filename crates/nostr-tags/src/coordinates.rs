//! Event coordinates: `["a", "<kind>:<pubkey-hex>:<identifier>", <relay-url>?]`.
//!
//! The raw [`Tag`] is the only stored state. Construction checks structure
//! only (tag name and segment count); every typed field is parsed on access
//! and degrades to `None` when malformed, so coordinates pointing at kinds
//! or keys this crate cannot interpret still round-trip untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::kind::EventKind;
use crate::public_key::PublicKey;
use crate::relay_url::{RelayUrl, RelayUrlValidator};
use crate::tag::Tag;
use crate::Error;

pub const COORDINATES_TAG: &str = "a";

const SEGMENT_SEPARATOR: char = ':';
const MIN_SEGMENTS: usize = 3;

/// Equality and hashing cover the raw tag only, never the derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Tag", into = "Tag")]
pub struct EventCoordinates {
    tag: Tag,
}

impl EventCoordinates {
    /// Builds an `a` tag from typed components.
    ///
    /// Addressable kinds need an identifier and normal-replaceable kinds must
    /// not have one; every other kind is rejected. A relay URL that fails
    /// validation is an error here, unlike on the decode path.
    pub fn new(
        kind: EventKind,
        pubkey: &PublicKey,
        identifier: Option<&str>,
        relay_url: Option<&str>,
    ) -> Result<Self, Error> {
        Self::new_with(
            &RelayUrlValidator::default(),
            kind,
            pubkey,
            identifier,
            relay_url,
        )
    }

    pub fn new_with(
        validator: &RelayUrlValidator,
        kind: EventKind,
        pubkey: &PublicKey,
        identifier: Option<&str>,
        relay_url: Option<&str>,
    ) -> Result<Self, Error> {
        if identifier.is_some_and(str::is_empty) {
            return Err(Error::InvalidInput(
                "identifier must not be empty; pass None for normal-replaceable kinds".to_string(),
            ));
        }

        let identifier_ok = match identifier {
            Some(_) => kind.is_addressable(),
            None => kind.is_normal_replaceable(),
        };
        if !identifier_ok {
            debug!(kind = %kind, has_identifier = identifier.is_some(), "rejecting coordinates");
            return Err(Error::InvalidInput(format!(
                "kind {} {} an identifier",
                kind,
                if identifier.is_some() {
                    "does not take"
                } else {
                    "requires"
                }
            )));
        }

        if identifier.is_some_and(|id| id.contains(SEGMENT_SEPARATOR)) {
            return Err(Error::InvalidInput(format!(
                "identifier must not contain '{}'",
                SEGMENT_SEPARATOR
            )));
        }

        let other_parameters = match relay_url {
            Some(url) => vec![validator.validate(url)?.to_string()],
            None => Vec::new(),
        };

        let value = format!(
            "{}{sep}{}{sep}{}",
            kind.as_u16(),
            pubkey.hex(),
            identifier.unwrap_or_default(),
            sep = SEGMENT_SEPARATOR
        );

        let tag = Tag::new(COORDINATES_TAG, value, other_parameters);
        Self::try_from(tag)
    }

    /// Wraps `tag` when it is named `a` and its value has at least three
    /// `:`-separated segments. Empty segments count.
    pub fn from_tag(tag: Tag) -> Option<Self> {
        if tag.name != COORDINATES_TAG {
            debug!(name = %tag.name, "not a coordinates tag");
            return None;
        }
        let segments = tag.value.split(SEGMENT_SEPARATOR).count();
        if segments < MIN_SEGMENTS {
            debug!(value = %tag.value, segments, "coordinates value has too few segments");
            return None;
        }
        Some(Self { tag })
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn into_tag(self) -> Tag {
        self.tag
    }

    /// The composite `kind:pubkey:identifier` value.
    pub fn coordinate(&self) -> &str {
        &self.tag.value
    }

    /// Kinds missing from the known table come back as
    /// [`EventKind::Unknown`]; only a non-numeric segment yields `None`.
    pub fn kind(&self) -> Option<EventKind> {
        let raw = self.segment(0)?;
        let kind = raw.parse::<u16>().ok().map(EventKind::from);
        if kind.is_none() {
            trace!(raw, "non-numeric coordinates kind");
        }
        kind
    }

    pub fn pubkey(&self) -> Option<PublicKey> {
        let raw = self.segment(1)?;
        let pubkey = PublicKey::from_hex(raw);
        if pubkey.is_none() {
            trace!(raw, "malformed coordinates pubkey");
        }
        pubkey
    }

    /// `None` when the segment is empty, which marks a normal-replaceable
    /// target rather than a missing value.
    pub fn identifier(&self) -> Option<&str> {
        self.segment(2).filter(|identifier| !identifier.is_empty())
    }

    pub fn relay_url(&self) -> Option<RelayUrl> {
        self.relay_url_with(&RelayUrlValidator::default())
    }

    pub fn relay_url_with(&self, validator: &RelayUrlValidator) -> Option<RelayUrl> {
        let raw = self.tag.other_parameters.first()?;
        match validator.validate(raw) {
            Ok(url) => Some(url),
            Err(err) => {
                trace!(error = %err, "ignoring coordinates relay hint");
                None
            }
        }
    }

    fn segment(&self, index: usize) -> Option<&str> {
        self.tag.value.split(SEGMENT_SEPARATOR).nth(index)
    }
}

impl TryFrom<Tag> for EventCoordinates {
    type Error = Error;

    fn try_from(tag: Tag) -> Result<Self, Self::Error> {
        let parts = tag.to_parts();
        Self::from_tag(tag).ok_or_else(|| {
            Error::MalformedTag(format!("not an event coordinates tag: {:?}", parts))
        })
    }
}

impl From<EventCoordinates> for Tag {
    fn from(coordinates: EventCoordinates) -> Self {
        coordinates.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

    fn pubkey() -> PublicKey {
        PublicKey::from_hex(PUBKEY).unwrap()
    }

    fn a_tag(value: &str, other: &[&str]) -> Tag {
        Tag::new(
            COORDINATES_TAG,
            value,
            other.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn rejects_other_tag_names() {
        for name in ["e", "p", "d", "A", ""] {
            let tag = Tag::new(name, format!("30023:{}:slug", PUBKEY), Vec::new());
            assert!(EventCoordinates::from_tag(tag).is_none(), "{name:?}");
        }
    }

    #[test]
    fn rejects_too_few_segments() {
        for value in ["", "30023", "30023:abcd", ":"] {
            assert!(EventCoordinates::from_tag(a_tag(value, &[])).is_none(), "{value:?}");
        }
    }

    #[test]
    fn keeps_empty_segments() {
        let coordinates = EventCoordinates::from_tag(a_tag("::", &[])).unwrap();
        assert_eq!(coordinates.kind(), None);
        assert_eq!(coordinates.pubkey(), None);
        assert_eq!(coordinates.identifier(), None);
    }

    #[test]
    fn decodes_addressable_coordinates() {
        let value = format!("30023:{}:my-article", PUBKEY);
        let coordinates =
            EventCoordinates::from_tag(a_tag(&value, &["wss://relay.example.com"])).unwrap();
        assert_eq!(coordinates.kind(), Some(EventKind::LongFormArticle));
        assert_eq!(coordinates.pubkey().map(|key| key.hex()).as_deref(), Some(PUBKEY));
        assert_eq!(coordinates.identifier(), Some("my-article"));
        assert_eq!(
            coordinates.relay_url().map(|url| url.to_string()).as_deref(),
            Some("wss://relay.example.com")
        );
        assert_eq!(coordinates.coordinate(), value);
    }

    #[test]
    fn degrades_gracefully_on_bad_fields() {
        let coordinates = EventCoordinates::from_tag(a_tag("10002::", &[])).unwrap();
        assert_eq!(coordinates.kind(), Some(EventKind::RelayListMetadata));
        assert_eq!(coordinates.pubkey(), None);
        assert_eq!(coordinates.identifier(), None);
        assert_eq!(coordinates.relay_url(), None);

        let coordinates =
            EventCoordinates::from_tag(a_tag("nope:zz:id", &["https://example.com"])).unwrap();
        assert_eq!(coordinates.kind(), None);
        assert_eq!(coordinates.pubkey(), None);
        assert_eq!(coordinates.identifier(), Some("id"));
        assert_eq!(coordinates.relay_url(), None);
    }

    #[test]
    fn identifier_keeps_extra_segments_out() {
        let value = format!("30023:{}:slug:extra", PUBKEY);
        let coordinates = EventCoordinates::from_tag(a_tag(&value, &[])).unwrap();
        assert_eq!(coordinates.identifier(), Some("slug"));
    }

    #[test]
    fn new_addressable_roundtrip() {
        let coordinates = EventCoordinates::new(
            EventKind::LongFormArticle,
            &pubkey(),
            Some("my-article"),
            Some("wss://relay.example.com"),
        )
        .unwrap();
        assert_eq!(coordinates.kind(), Some(EventKind::LongFormArticle));
        assert_eq!(coordinates.pubkey(), Some(pubkey()));
        assert_eq!(coordinates.identifier(), Some("my-article"));
        assert_eq!(
            coordinates.relay_url(),
            Some(RelayUrl::parse("wss://relay.example.com").unwrap())
        );
    }

    #[test]
    fn new_normal_replaceable_has_empty_identifier_segment() {
        let coordinates =
            EventCoordinates::new(EventKind::RelayListMetadata, &pubkey(), None, None).unwrap();
        assert_eq!(coordinates.identifier(), None);
        assert_eq!(coordinates.coordinate(), format!("10002:{}:", PUBKEY));
        assert_eq!(coordinates.coordinate().split(':').nth(2), Some(""));
        assert!(coordinates.tag().other_parameters.is_empty());
    }

    #[test]
    fn new_enforces_identifier_rule() {
        let key = pubkey();
        assert!(matches!(
            EventCoordinates::new(EventKind::LongFormArticle, &key, None, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            EventCoordinates::new(EventKind::ContactList, &key, Some("x"), None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            EventCoordinates::new(EventKind::TextNote, &key, None, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            EventCoordinates::new(EventKind::TextNote, &key, Some("x"), None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn new_rejects_identifier_with_separator() {
        assert!(matches!(
            EventCoordinates::new(EventKind::LongFormArticle, &pubkey(), Some("a:b"), None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn new_rejects_empty_identifier() {
        let result = EventCoordinates::new(EventKind::LongFormArticle, &pubkey(), Some(""), None);
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = EventCoordinates::new(EventKind::RelayListMetadata, &pubkey(), Some(""), None);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn unknown_kinds_decode_and_build_by_range() {
        let value = format!("34550:{}:community", PUBKEY);
        let decoded = EventCoordinates::from_tag(a_tag(&value, &[])).unwrap();
        assert_eq!(decoded.kind(), Some(EventKind::Unknown(34550)));

        let built =
            EventCoordinates::new(EventKind::from(34550u16), &pubkey(), Some("community"), None)
                .unwrap();
        assert_eq!(built, decoded);

        let dm_relays =
            EventCoordinates::new(EventKind::from(10050u16), &pubkey(), None, None).unwrap();
        assert_eq!(dm_relays.kind(), Some(EventKind::Unknown(10050)));
        assert_eq!(dm_relays.identifier(), None);

        assert!(matches!(
            EventCoordinates::new(EventKind::from(2u16), &pubkey(), None, None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn new_rejects_invalid_relay_url() {
        let result = EventCoordinates::new(
            EventKind::LongFormArticle,
            &pubkey(),
            Some("slug"),
            Some("https://relay.example.com"),
        );
        assert!(matches!(result, Err(Error::InvalidRelayUrl { .. })));
    }

    #[test]
    fn equality_is_over_raw_tag() {
        let a = EventCoordinates::from_tag(a_tag("99999:zz:x", &[])).unwrap();
        let b = EventCoordinates::from_tag(a_tag("99999:zz:x", &[])).unwrap();
        let c = EventCoordinates::from_tag(a_tag("99999:zz:x", &["wss://relay.example.com"]))
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.kind(), c.kind());
    }

    #[test]
    fn serde_uses_tag_array() {
        let json = format!(r#"["a","30023:{}:slug"]"#, PUBKEY);
        let coordinates: EventCoordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(coordinates.identifier(), Some("slug"));
        assert_eq!(serde_json::to_string(&coordinates).unwrap(), json);
        assert!(serde_json::from_str::<EventCoordinates>(r#"["e","30023:x:y"]"#).is_err());
    }
}
