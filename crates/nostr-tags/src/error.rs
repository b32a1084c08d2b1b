use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed tag: {0}")]
    MalformedTag(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid relay url {url}: {reason}")]
    InvalidRelayUrl { url: String, reason: String },
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("nostr tag error: {0}")]
    NostrTag(#[from] nostr::event::tag::Error),
    #[error("serde json error: {0}")]
    Json(#[from] serde_json::Error),
}
