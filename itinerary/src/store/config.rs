//! Store configuration.

use std::path::PathBuf;

/// Default snapshot location.
const DEFAULT_SNAPSHOT_PATH: &str = "itinerary.json";

/// Default CSV export location.
const DEFAULT_EXPORT_PATH: &str = "travel_data.csv";

/// File locations used by `ItineraryStore`.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Snapshot rewritten after every mutation.
    pub snapshot_path: PathBuf,

    /// Target for `export_csv_default`.
    pub export_path: PathBuf,
}

impl StoreConfig {
    /// Create a config with the given snapshot path and default export path.
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }

    /// Set the CSV export path.
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_PATH)
    }
}
