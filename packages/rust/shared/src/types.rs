//! Core domain types for the dexterm fetch-merge-render pipeline.

use serde::{Deserialize, Serialize};
use url::Url;

// ---------------------------------------------------------------------------
// Reference
// ---------------------------------------------------------------------------

/// A lightweight roster entry prior to sprite enrichment.
///
/// Produced by the listing fetch; consumed by the fan-out stage. The name is
/// unique within a batch and later keys the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Entity name.
    pub name: String,
    /// Locator of the per-entity detail record.
    pub detail_url: Url,
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// The per-entity detail record: just the front sprite, if the entity has one.
///
/// Ephemeral — consumed immediately by projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    /// Front sprite URL, absent when the API has none for this entity.
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// DisplayRecord
// ---------------------------------------------------------------------------

/// The flattened record consumed by rendering. Immutable once constructed;
/// owned solely by the published collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    /// Entity name (list key).
    pub name: String,
    /// Front sprite URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// The snapshot observed by the presentation layer.
///
/// `items` is either empty (while `loading` is true, or after a failure) or
/// holds exactly one [`DisplayRecord`] per roster entry, in listing order.
/// The state is only ever replaced as a whole — partial population is never
/// observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineState {
    /// Ordered display records.
    pub items: Vec<DisplayRecord>,
    /// True from activation until the single terminal publication.
    pub loading: bool,
}

impl PipelineState {
    /// Initial state at screen activation.
    pub fn idle() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
        }
    }

    /// Terminal success state carrying the full projection.
    pub fn success(items: Vec<DisplayRecord>) -> Self {
        Self {
            items,
            loading: false,
        }
    }

    /// Terminal failure state: loading resolved, items stay empty.
    pub fn failed() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::idle()
    }
}
