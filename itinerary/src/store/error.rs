//! Itinerary store error types.

use std::fmt;
use std::path::PathBuf;

/// Why a coordinate lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    NotFound,
    TimedOut,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NotFound => f.write_str("no coordinates found"),
            Unresolved::TimedOut => f.write_str("request timed out"),
        }
    }
}

/// Errors reported by `ItineraryStore` operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Operation referenced a waypoint that isn't in the itinerary
    #[error("'{name}' not found in the itinerary")]
    NotFound { name: String },

    /// Insert of a name that is already present
    #[error("'{name}' is already in the itinerary")]
    DuplicateName { name: String },

    /// Coordinate resolution failed; nothing was inserted
    #[error("could not resolve coordinates for '{query}': {reason}")]
    ResolutionFailure { query: String, reason: Unresolved },

    /// Snapshot read or write failed
    #[error("snapshot error at {}: {message}", .path.display())]
    Persistence { path: PathBuf, message: String },

    /// CSV export failed
    #[error("export to {} failed: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Distance needs at least two waypoints
    #[error("not enough waypoints to calculate distance ({waypoints}, need 2)")]
    InsufficientData { waypoints: usize },
}

impl StoreError {
    pub(crate) fn not_found(name: &str) -> Self {
        StoreError::NotFound {
            name: name.to_string(),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        StoreError::Persistence {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
