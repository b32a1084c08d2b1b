use std::io::{self, BufRead};

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nostr_tags::{
    EventCoordinates, EventKind, PublicKey, ReferenceTag, RelayUrlPolicy, RelayUrlValidator, Tag,
};

#[derive(Debug, Parser)]
#[command(name = "nostr-tag-inspect")]
#[command(about = "Interpret Nostr reference and coordinates tags")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode tags given as JSON arrays, one per argument or per stdin line.
    Inspect {
        tags: Vec<String>,
        #[arg(long)]
        allow_local: bool,
    },
    /// Build an `a` tag from its components.
    Coordinate {
        #[arg(long)]
        kind: u16,
        #[arg(long)]
        pubkey: String,
        #[arg(long)]
        identifier: Option<String>,
        #[arg(long)]
        relay: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    match args.command {
        Command::Inspect { tags, allow_local } => {
            let mut policy = RelayUrlPolicy::from_env();
            policy.allow_local |= allow_local;
            let validator = RelayUrlValidator::new(policy);

            let lines: Vec<String> = if tags.is_empty() {
                io::stdin().lock().lines().collect::<Result<_, _>>()?
            } else {
                tags
            };

            for line in lines.iter().filter(|line| !line.trim().is_empty()) {
                let tag = match Tag::from_json(line) {
                    Ok(tag) => tag,
                    Err(err) => {
                        warn!(error = %err, line = %line, "skipping malformed tag input");
                        continue;
                    }
                };
                println!("{}", describe(tag, &validator));
            }
        }
        Command::Coordinate {
            kind,
            pubkey,
            identifier,
            relay,
        } => {
            let kind = EventKind::from(kind);
            let pubkey: PublicKey = pubkey.parse()?;
            let coordinates = EventCoordinates::new(
                kind,
                &pubkey,
                identifier.as_deref(),
                relay.as_deref(),
            )?;
            info!(coordinate = %coordinates.coordinate(), "built coordinates tag");
            println!("{}", coordinates.tag().as_json()?);
        }
    }

    Ok(())
}

fn describe(tag: Tag, validator: &RelayUrlValidator) -> Value {
    let parts = tag.to_parts();

    if let Some(coordinates) = EventCoordinates::from_tag(tag) {
        return json!({
            "type": "coordinates",
            "raw": parts,
            "kind": coordinates.kind().map(|kind| kind.as_u16()),
            "kind_name": coordinates.kind().map(|kind| format!("{:?}", kind)),
            "pubkey": coordinates.pubkey().map(|key| key.hex()),
            "identifier": coordinates.identifier(),
            "relay_url": coordinates.relay_url_with(validator).map(|url| url.to_string()),
        });
    }

    match ReferenceTag::decode(&parts) {
        Ok(reference) => json!({
            "type": "reference",
            "raw": parts,
            "kind": reference.kind.as_str(),
            "known_kind": reference.kind.is_known(),
            "target_id": reference.target_id,
            "recommended_relay_url": reference.recommended_relay_url,
        }),
        Err(err) => json!({
            "type": "invalid",
            "raw": parts,
            "error": err.to_string(),
        }),
    }
}
