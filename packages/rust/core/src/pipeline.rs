//! One-shot fetch-merge pipeline: listing → sprite fan-out → projection.
//!
//! Runs exactly once per activation. The orchestration suspends twice, once
//! awaiting the listing fetch and once awaiting the joined fan-out; between
//! those points no other pipeline logic runs. Success publishes the full
//! projection; a failure at any stage publishes the empty Failed snapshot
//! after a single diagnostic log record. There is no retry transition.

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{error, info, instrument};
use url::Url;

use dexterm_shared::{AppConfig, DextermError, DisplayRecord, PipelineState, Result};

use crate::projection::project;
use crate::state::StatePublisher;

/// User-Agent string for upstream requests.
const USER_AGENT: &str = concat!("dexterm/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Runtime pipeline configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Collection endpoint the roster is listed from.
    pub listing_endpoint: Url,
    /// Optional per-request timeout. `None` matches the upstream contract as
    /// shipped: a hung request suspends the pipeline indefinitely.
    pub timeout: Option<Duration>,
}

impl PipelineConfig {
    /// Build a pipeline config from the loaded application config.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        let listing_endpoint = Url::parse(&config.api.listing_endpoint).map_err(|e| {
            DextermError::config(format!(
                "invalid listing endpoint '{}': {e}",
                config.api.listing_endpoint
            ))
        })?;

        Ok(Self {
            listing_endpoint,
            timeout: config.api.timeout_secs.map(Duration::from_secs),
        })
    }
}

// ---------------------------------------------------------------------------
// PipelineOutcome
// ---------------------------------------------------------------------------

/// Terminal outcome of one pipeline activation.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The full roster was published.
    Success {
        /// Number of display records published.
        count: usize,
        /// Total elapsed time.
        elapsed: Duration,
    },
    /// A stage failed; the empty snapshot was published.
    Failed {
        /// The stage error, already logged on the diagnostic channel.
        error: DextermError,
        /// Total elapsed time.
        elapsed: Duration,
    },
}

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

/// Run the pipeline once and publish its terminal state.
///
/// On failure the error is reported on the tracing channel only — the
/// published snapshot carries no error information, just `loading = false`
/// with empty items.
#[instrument(skip_all, fields(endpoint = %config.listing_endpoint))]
pub async fn activate(config: &PipelineConfig, publisher: &StatePublisher) -> PipelineOutcome {
    let start = Instant::now();

    match run_stages(config).await {
        Ok(items) => {
            let count = items.len();
            publisher.publish(PipelineState::success(items));

            let elapsed = start.elapsed();
            info!(count, elapsed_ms = elapsed.as_millis(), "roster published");
            PipelineOutcome::Success { count, elapsed }
        }
        Err(error) => {
            error!(%error, "pipeline failed");
            publisher.publish(PipelineState::failed());

            PipelineOutcome::Failed {
                error,
                elapsed: start.elapsed(),
            }
        }
    }
}

/// The three stages in strict sequence. Any stage error aborts the rest.
async fn run_stages(config: &PipelineConfig) -> Result<Vec<DisplayRecord>> {
    let client = build_client(config.timeout)?;

    let references = dexterm_roster::fetch_roster(&client, &config.listing_endpoint).await?;
    info!(entries = references.len(), "listing fetched, fanning out");

    let details = dexterm_sprites::fetch_all(&client, &references).await?;

    Ok(project(&references, &details))
}

/// Build the HTTP client shared by both fetch stages.
fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| DextermError::Network(format!("failed to build HTTP client: {e}")))
}
