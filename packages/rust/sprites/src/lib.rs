//! Sprite fan-out: one detail request per roster reference.
//!
//! All requests start together — no concurrency cap, no batching — and the
//! stage joins them in input order, so the output is index-aligned with the
//! references regardless of completion order. The policy is all-or-nothing:
//! the first failed sub-request fails the whole stage and no display records
//! are produced. Sub-requests already in flight when one fails are left to
//! finish on their own; nothing cancels them.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use dexterm_shared::{Detail, DextermError, Reference, Result};

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// The slice of the detail response this system consumes:
/// `{ "sprites": { "front_default": string | null } }`.
/// A null or missing sprite is an absent image, never an error.
#[derive(Debug, Deserialize)]
struct DetailBody {
    #[serde(default)]
    sprites: SpriteSheet,
}

#[derive(Debug, Default, Deserialize)]
struct SpriteSheet {
    #[serde(default)]
    front_default: Option<String>,
}

// ---------------------------------------------------------------------------
// Fan-out
// ---------------------------------------------------------------------------

/// Fetch every reference's detail record concurrently.
///
/// Returns `details` with `details[i]` belonging to `references[i]`, or the
/// first error encountered while joining in input order.
#[instrument(skip_all, fields(count = references.len()))]
pub async fn fetch_all(client: &Client, references: &[Reference]) -> Result<Vec<Detail>> {
    let mut handles = Vec::with_capacity(references.len());

    for reference in references {
        let client = client.clone();
        let name = reference.name.clone();
        let url = reference.detail_url.clone();

        handles.push(tokio::spawn(async move {
            fetch_sprite(&client, &url)
                .await
                .map_err(|e| DextermError::Network(format!("{name}: {e}")))
        }));
    }

    // Join in spawn order: position i of the output corresponds to
    // references[i] no matter which request finished first.
    let mut details = Vec::with_capacity(handles.len());
    for handle in handles {
        let detail = handle
            .await
            .map_err(|e| DextermError::Network(format!("sprite task: {e}")))??;
        details.push(detail);
    }

    debug!(fetched = details.len(), "sprite fan-out complete");
    Ok(details)
}

/// Fetch a single detail record and extract its front sprite.
async fn fetch_sprite(client: &Client, url: &Url) -> Result<Detail> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| DextermError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DextermError::Network(format!("{url}: HTTP {status}")));
    }

    let body: DetailBody = response
        .json()
        .await
        .map_err(|e| DextermError::decode(format!("{url}: {e}")))?;

    Ok(Detail {
        image: body.sprites.front_default,
    })
}
