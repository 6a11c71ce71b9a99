//! Fetch lifecycle state surfaced to renderers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the catalog fetch as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FetchStatus {
    /// The fetch has not resolved yet.
    Pending,
    /// The catalog was fetched and accepted.
    Loaded { fetched_at: DateTime<Utc> },
    /// The fetch failed; the catalog keeps its previous contents.
    Failed { reason: String },
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Pending => "pending",
            FetchStatus::Loaded { .. } => "loaded",
            FetchStatus::Failed { .. } => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchStatus::Pending)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchStatus::Loaded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchStatus::Failed { .. })
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}
