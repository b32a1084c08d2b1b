//! Typed NIP-01 tags: references and event coordinates.
//!
//! Events carry tags as ordered string lists. This crate gives structure to
//! two shapes of them:
//!
//! | Tag | Type | Shape |
//! |-----|------|-------|
//! | `e` / `p` | [`ReferenceTag`] | `["e"\|"p", <id>, <relay-url>?]` |
//! | `a` | [`EventCoordinates`] | `["a", "<kind>:<pubkey>:<identifier>", <relay-url>?]` |
//!
//! Decoding wire data is lenient. A tag that is structurally wrong yields
//! `None`, and a coordinates tag with an unparseable kind, key or relay hint
//! still decodes while the matching accessor returns `None`. Building
//! coordinates from typed parts is strict and returns [`Error::InvalidInput`]
//! or [`Error::InvalidRelayUrl`] on bad input.
//!
//! # Example
//!
//! ```rust
//! use nostr_tags::{EventCoordinates, EventKind, PublicKey, Tag};
//!
//! let pubkey = PublicKey::from_hex(
//!     "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789",
//! )
//! .unwrap();
//! let coordinates = EventCoordinates::new(
//!     EventKind::LongFormArticle,
//!     &pubkey,
//!     Some("my-article"),
//!     Some("wss://relay.example.com"),
//! )
//! .unwrap();
//!
//! let decoded = EventCoordinates::from_tag(coordinates.tag().clone()).unwrap();
//! assert_eq!(decoded.identifier(), Some("my-article"));
//! assert_eq!(decoded, coordinates);
//!
//! assert!(EventCoordinates::from_tag(Tag::new("a", "30023:abcd", Vec::new())).is_none());
//! ```

mod config;
mod coordinates;
mod error;
mod kind;
mod public_key;
mod reference;
mod relay_url;
mod tag;

pub use config::{RelayUrlPolicy, ENV_ALLOW_LOCAL, ENV_ALLOW_ONION};
pub use coordinates::{EventCoordinates, COORDINATES_TAG};
pub use error::Error;
pub use kind::EventKind;
pub use public_key::{PublicKey, PUBLIC_KEY_LEN};
pub use reference::{ReferenceKind, ReferenceTag, EVENT_REFERENCE, PUBKEY_REFERENCE};
pub use relay_url::{RelayUrl, RelayUrlValidator};
pub use tag::{event_coordinates, event_references, parse_tags, pubkey_references, tag_value, Tag};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
