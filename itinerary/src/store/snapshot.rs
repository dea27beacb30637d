//! Disk snapshot of the itinerary.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Waypoint;

use super::error::StoreError;
use super::sequence::Sequence;

/// Current snapshot format version.
const FORMAT_VERSION: u32 = 1;

/// Snapshot contents with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    /// Format version, bumped on incompatible changes.
    version: u32,
    /// When the snapshot was written.
    saved_at: DateTime<Utc>,
    /// Waypoints in travel order.
    waypoints: Vec<Waypoint>,
}

/// JSON snapshot file holding the full ordered itinerary.
///
/// Writes overwrite the file in place; there is no write-then-rename step.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot.
    ///
    /// Returns `Ok(None)` if no snapshot has been written yet. Unreadable
    /// files, bad JSON, out-of-range coordinates, repeated names, and
    /// unknown versions are all errors.
    pub fn load(&self) -> Result<Option<Sequence>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::persistence(
                    &self.path,
                    format!("failed to read: {e}"),
                ));
            }
        };

        let document: SnapshotDocument = serde_json::from_str(&contents)
            .map_err(|e| StoreError::persistence(&self.path, format!("failed to parse: {e}")))?;

        if document.version != FORMAT_VERSION {
            return Err(StoreError::persistence(
                &self.path,
                format!("unsupported snapshot version {}", document.version),
            ));
        }

        Sequence::from_waypoints(document.waypoints)
            .map(Some)
            .map_err(|e| StoreError::persistence(&self.path, e))
    }

    /// Write the whole sequence.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, sequence: &Sequence) -> Result<(), StoreError> {
        let document = SnapshotDocument {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            waypoints: sequence.as_slice().to_vec(),
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::persistence(&self.path, format!("failed to create directory: {e}"))
            })?;
        }

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| StoreError::persistence(&self.path, format!("failed to serialize: {e}")))?;

        std::fs::write(&self.path, json)
            .map_err(|e| StoreError::persistence(&self.path, format!("failed to write: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use tempfile::tempdir;

    fn sample() -> Sequence {
        Sequence::from_waypoints(vec![
            Waypoint {
                name: "Huay Xai".to_string(),
                country: "Laos".to_string(),
                coordinate: Coordinate::new(20.2771, 100.4139).unwrap(),
                duration_days: 2,
                transport_mode: String::new(),
            },
            Waypoint {
                name: "Luang Prabang".to_string(),
                country: "Laos".to_string(),
                coordinate: Coordinate::new(19.893, 102.135).unwrap(),
                duration_days: 2,
                transport_mode: "Boat".to_string(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("trip.json"));

        file.save(&sample()).unwrap();
        let loaded = file.load().unwrap().unwrap();

        assert_eq!(loaded.as_slice(), sample().as_slice());
    }

    #[test]
    fn missing_file_is_none() {
        let file = SnapshotFile::new("/nonexistent/path/trip.json");
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn unreadable_path_is_error_not_fresh_start() {
        let dir = tempdir().unwrap();
        // Reading a directory fails with something other than NotFound
        let err = SnapshotFile::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[cfg(unix)]
    #[test]
    fn permission_denied_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("trip.json");
        let file = SnapshotFile::new(&path);
        file.save(&sample()).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes, so only check when the read really fails
        if std::fs::read_to_string(&path).is_err() {
            assert!(matches!(file.load(), Err(StoreError::Persistence { .. })));
        }
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("trip.json");
        let file = SnapshotFile::new(&path);

        file.save(&Sequence::new()).unwrap();
        assert!(path.exists());
        assert!(file.load().unwrap().unwrap().is_empty());
    }

    #[test]
    fn document_shape() {
        let dir = tempdir().unwrap();
        let file = SnapshotFile::new(dir.path().join("trip.json"));
        file.save(&sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert!(raw["saved_at"].is_string());
        assert_eq!(raw["waypoints"][0]["name"], "Huay Xai");
        assert_eq!(raw["waypoints"][1]["transport_mode"], "Boat");
    }

    #[test]
    fn corrupt_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trip.json");
        std::fs::write(&path, b"\x80not json").unwrap();

        let err = SnapshotFile::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }

    #[test]
    fn duplicate_names_are_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trip.json");
        let wp = r#"{"name": "Hue", "country": "Vietnam",
            "coordinate": {"latitude": 16.4637, "longitude": 107.5909},
            "duration_days": 2, "transport_mode": ""}"#;
        let doc = format!(
            r#"{{"version": 1, "saved_at": "2026-01-01T00:00:00Z", "waypoints": [{wp}, {wp}]}}"#
        );
        std::fs::write(&path, doc).unwrap();

        let err = SnapshotFile::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("duplicate waypoint name 'Hue'"));
    }

    #[test]
    fn unknown_version_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trip.json");
        std::fs::write(
            &path,
            r#"{"version": 7, "saved_at": "2026-01-01T00:00:00Z", "waypoints": []}"#,
        )
        .unwrap();

        let err = SnapshotFile::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("unsupported snapshot version 7"));
    }

    #[test]
    fn unwritable_path_is_error() {
        let dir = tempdir().unwrap();
        // A directory can't be overwritten as a file
        let file = SnapshotFile::new(dir.path());
        assert!(matches!(
            file.save(&sample()),
            Err(StoreError::Persistence { .. })
        ));
    }
}
