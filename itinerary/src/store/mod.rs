//! The ordered itinerary store.
//!
//! `ItineraryStore` owns the waypoint sequence, resolves coordinates for new
//! stops, and rewrites its snapshot after every mutation. A failed snapshot
//! write is reported but doesn't roll back the in-memory change.

mod analytics;
mod config;
mod error;
mod export;
mod sequence;
mod snapshot;


pub use analytics::{CountryDays, LegDistance, geodesic_km};
pub use config::StoreConfig;
pub use error::{StoreError, Unresolved};
pub use export::{CSV_HEADER, write_csv};
pub use sequence::{DuplicateWaypoint, Renamed, Sequence};
pub use snapshot::SnapshotFile;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::domain::{NewWaypoint, Position, Waypoint};
use crate::resolver::{CoordinateResolver, Resolution};

/// Ordered, uniquely keyed itinerary with snapshot persistence.
///
/// Mutations take `&mut self`; sharing a store between threads needs a
/// single lock around the whole store.
#[derive(Debug)]
pub struct ItineraryStore<R> {
    sequence: Sequence,
    snapshot: SnapshotFile,
    export_path: PathBuf,
    resolver: R,
    load_error: Option<StoreError>,
}

impl<R: CoordinateResolver> ItineraryStore<R> {
    /// Open a store, loading the snapshot if there is one.
    ///
    /// A snapshot that can't be read starts the store empty; the error is
    /// logged and kept for `load_error`.
    pub fn open(config: StoreConfig, resolver: R) -> Self {
        let snapshot = SnapshotFile::new(config.snapshot_path);

        let (sequence, load_error) = match snapshot.load() {
            Ok(Some(sequence)) => {
                info!(
                    path = %snapshot.path().display(),
                    waypoints = sequence.len(),
                    "itinerary loaded"
                );
                (sequence, None)
            }
            Ok(None) => {
                info!(path = %snapshot.path().display(), "no existing itinerary, starting fresh");
                (Sequence::new(), None)
            }
            Err(e) => {
                error!(error = %e, "failed to load itinerary, starting empty");
                (Sequence::new(), Some(e))
            }
        };

        Self {
            sequence,
            snapshot,
            export_path: config.export_path,
            resolver,
            load_error,
        }
    }

    /// Error hit while loading the snapshot in `open`, if any.
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn snapshot_path(&self) -> &Path {
        self.snapshot.path()
    }

    // Queries

    /// Names in travel order.
    pub fn list(&self) -> Vec<&str> {
        self.sequence.names().collect()
    }

    /// Waypoints in travel order.
    pub fn waypoints(&self) -> &[Waypoint] {
        self.sequence.as_slice()
    }

    pub fn get(&self, name: &str) -> Option<&Waypoint> {
        self.sequence.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sequence.contains(name)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.sequence.position_of(name)
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    // Mutations

    /// Resolve a new waypoint's coordinate and insert it.
    ///
    /// Nothing changes and nothing is written if the name is taken or the
    /// coordinate can't be resolved.
    pub fn insert(
        &mut self,
        request: NewWaypoint,
        position: Position,
    ) -> Result<&Waypoint, StoreError> {
        if self.sequence.contains(&request.name) {
            warn!(name = %request.name, "skipping insert, name already in itinerary");
            return Err(StoreError::DuplicateName { name: request.name });
        }

        let query = request.resolver_query();
        let coordinate = match self.resolver.resolve(&query) {
            Resolution::Found(c) => c,
            Resolution::NotFound => return Err(unresolved(query, Unresolved::NotFound)),
            Resolution::TimedOut => return Err(unresolved(query, Unresolved::TimedOut)),
        };

        let waypoint = Waypoint::from_request(request, coordinate);
        let at = self
            .sequence
            .insert(waypoint, &position)
            .map_err(|wp| StoreError::DuplicateName { name: wp.name })?;

        let added = &self.sequence.as_slice()[at];
        info!(
            name = %added.name,
            days = added.duration_days,
            transport = %added.transport_mode,
            %coordinate,
            %position,
            index = at,
            "added waypoint"
        );

        self.commit()?;
        Ok(&self.sequence.as_slice()[at])
    }

    /// Remove a waypoint.
    pub fn remove(&mut self, name: &str) -> Result<Waypoint, StoreError> {
        let removed = self
            .sequence
            .remove(name)
            .ok_or_else(|| missing(name))?;

        info!(%name, "removed waypoint");
        self.commit()?;
        Ok(removed)
    }

    /// Move an existing waypoint, returning its new index.
    pub fn move_to(&mut self, name: &str, position: Position) -> Result<usize, StoreError> {
        let at = self
            .sequence
            .relocate(name, &position)
            .ok_or_else(|| missing(name))?;

        info!(%name, %position, index = at, "moved waypoint");
        self.commit()?;
        Ok(at)
    }

    pub fn set_duration(&mut self, name: &str, days: u32) -> Result<(), StoreError> {
        self.sequence
            .set_duration(name, days)
            .ok_or_else(|| missing(name))?;

        info!(%name, days, "updated duration");
        self.commit()
    }

    pub fn set_transport(&mut self, name: &str, transport_mode: &str) -> Result<(), StoreError> {
        self.sequence
            .set_transport(name, transport_mode)
            .ok_or_else(|| missing(name))?;

        info!(%name, transport = %transport_mode, "updated transport");
        self.commit()
    }

    /// Change a waypoint's country. The coordinate is left alone.
    pub fn set_country(&mut self, name: &str, country: &str) -> Result<(), StoreError> {
        self.sequence
            .set_country(name, country)
            .ok_or_else(|| missing(name))?;

        info!(%name, %country, "updated country");
        self.commit()
    }

    /// Rename a waypoint, keeping its position and data.
    ///
    /// If `new_name` already belongs to another waypoint, that waypoint is
    /// dropped and returned in `Renamed::overwritten`.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<Renamed, StoreError> {
        let renamed = self
            .sequence
            .rename(old_name, new_name)
            .ok_or_else(|| missing(old_name))?;

        if renamed.overwritten.is_some() {
            warn!(%old_name, %new_name, "rename overwrote an existing waypoint");
        }
        info!(%old_name, %new_name, "renamed waypoint");

        self.commit()?;
        Ok(renamed)
    }

    /// Remove every waypoint and persist the empty itinerary.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.sequence.clear();
        info!("cleared itinerary");
        self.commit()
    }

    // Persistence

    /// Write the snapshot.
    pub fn save(&self) -> Result<(), StoreError> {
        self.snapshot.save(&self.sequence)?;
        debug!(path = %self.snapshot.path().display(), "itinerary saved");
        Ok(())
    }

    fn commit(&self) -> Result<(), StoreError> {
        self.save().inspect_err(|e| {
            error!(error = %e, "failed to save itinerary; memory and disk differ");
        })
    }

    /// Write the itinerary as CSV. Doesn't touch the snapshot.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let export_err = |source| StoreError::Export {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(export_err)?;
        write_csv(BufWriter::new(file), &self.sequence).map_err(export_err)?;

        info!(path = %path.display(), rows = self.sequence.len(), "exported itinerary");
        Ok(())
    }

    /// Export to the configured default path.
    pub fn export_csv_default(&self) -> Result<(), StoreError> {
        self.export_csv(&self.export_path)
    }

    // Analytics

    /// Total days across every waypoint.
    pub fn total_days(&self) -> u64 {
        analytics::total_days(self.sequence.as_slice())
    }

    /// Days per country, most first, ties in first-seen order.
    pub fn days_per_country(&self) -> Vec<CountryDays> {
        analytics::days_per_country(self.sequence.as_slice())
    }

    /// Distance of each consecutive hop.
    pub fn legs(&self) -> Vec<LegDistance> {
        analytics::legs(self.sequence.as_slice())
    }

    /// Geodesic distance along the itinerary in kilometres, unrounded.
    pub fn total_distance_km(&self) -> Result<f64, StoreError> {
        analytics::total_distance_km(self.sequence.as_slice()).ok_or_else(|| {
            warn!(waypoints = self.sequence.len(), "not enough waypoints to calculate distance");
            StoreError::InsufficientData {
                waypoints: self.sequence.len(),
            }
        })
    }
}

fn missing(name: &str) -> StoreError {
    warn!(%name, "not found in itinerary");
    StoreError::not_found(name)
}

fn unresolved(query: String, reason: Unresolved) -> StoreError {
    warn!(%query, %reason, "skipping insert, coordinates unavailable");
    StoreError::ResolutionFailure { query, reason }
}
