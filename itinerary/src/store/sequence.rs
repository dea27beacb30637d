//! Ordered, uniquely keyed waypoint sequence.
//!
//! Waypoints live in a `Vec` in travel order. A name → index table is kept
//! in sync on every mutation so lookups by name are O(1) and order never
//! depends on map iteration order.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Position, Waypoint};

/// Error returned when building a sequence from waypoints with a repeated name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate waypoint name '{0}'")]
pub struct DuplicateWaypoint(pub String);

/// Result of a rename.
#[derive(Debug, Clone, PartialEq)]
pub struct Renamed {
    /// Position of the renamed waypoint after the operation.
    pub index: usize,

    /// A different waypoint that previously held the new name and was dropped.
    pub overwritten: Option<Waypoint>,
}

/// The ordering engine behind `ItineraryStore`.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    entries: Vec<Waypoint>,
    index: HashMap<String, usize>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence keeping the given order.
    ///
    /// Fails if two waypoints share a name.
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Result<Self, DuplicateWaypoint> {
        let mut index = HashMap::with_capacity(waypoints.len());
        for (i, wp) in waypoints.iter().enumerate() {
            if index.insert(wp.name.clone(), i).is_some() {
                return Err(DuplicateWaypoint(wp.name.clone()));
            }
        }

        Ok(Self {
            entries: waypoints,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Zero-based position of a waypoint.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Waypoint> {
        self.position_of(name).map(|i| &self.entries[i])
    }

    /// Waypoints in travel order.
    pub fn as_slice(&self) -> &[Waypoint] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.entries.iter()
    }

    /// Names in travel order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|wp| wp.name.as_str())
    }

    /// Index a waypoint placed at `position` would land on.
    ///
    /// `After` a name that isn't present resolves to the end.
    pub fn slot(&self, position: &Position) -> usize {
        match position {
            Position::Start => 0,
            Position::End => self.entries.len(),
            Position::After(anchor) => match self.position_of(anchor) {
                Some(i) => i + 1,
                None => {
                    debug!(%anchor, "anchor not in itinerary, placing at end");
                    self.entries.len()
                }
            },
        }
    }

    /// Insert a waypoint, returning its index.
    ///
    /// A waypoint whose name is already present is handed back unchanged.
    pub fn insert(&mut self, waypoint: Waypoint, position: &Position) -> Result<usize, Waypoint> {
        if self.contains(&waypoint.name) {
            return Err(waypoint);
        }

        let at = self.slot(position);
        self.entries.insert(at, waypoint);
        self.reindex_from(at);
        Ok(at)
    }

    /// Remove a waypoint by name.
    pub fn remove(&mut self, name: &str) -> Option<Waypoint> {
        let at = self.index.remove(name)?;
        let removed = self.entries.remove(at);
        self.reindex_from(at);
        Some(removed)
    }

    /// Move an existing waypoint, returning its new index.
    ///
    /// The waypoint is taken out before the slot is computed, so anchoring a
    /// waypoint after itself sends it to the end.
    pub fn relocate(&mut self, name: &str, position: &Position) -> Option<usize> {
        let waypoint = self.remove(name)?;
        let at = self.slot(position);
        self.entries.insert(at, waypoint);
        self.reindex_from(at);
        Some(at)
    }

    /// Change a waypoint's key in place.
    ///
    /// If `new_name` belongs to a different waypoint, that waypoint is
    /// dropped and returned in `Renamed::overwritten`.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Option<Renamed> {
        let mut at = self.position_of(old_name)?;
        if old_name == new_name {
            return Some(Renamed {
                index: at,
                overwritten: None,
            });
        }

        let overwritten = self.remove(new_name);
        if overwritten.is_some() {
            // Removal shifted everything behind the dropped entry.
            at = self.position_of(old_name)?;
        }

        self.index.remove(old_name);
        self.entries[at].name = new_name.to_string();
        self.index.insert(new_name.to_string(), at);

        Some(Renamed {
            index: at,
            overwritten,
        })
    }

    pub fn set_duration(&mut self, name: &str, days: u32) -> Option<&Waypoint> {
        let at = self.position_of(name)?;
        self.entries[at].duration_days = days;
        Some(&self.entries[at])
    }

    pub fn set_transport(&mut self, name: &str, transport_mode: &str) -> Option<&Waypoint> {
        let at = self.position_of(name)?;
        self.entries[at].transport_mode = transport_mode.to_string();
        Some(&self.entries[at])
    }

    pub fn set_country(&mut self, name: &str, country: &str) -> Option<&Waypoint> {
        let at = self.position_of(name)?;
        self.entries[at].country = country.to_string();
        Some(&self.entries[at])
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Refresh index entries for every waypoint at or after `start`.
    fn reindex_from(&mut self, start: usize) {
        for (i, wp) in self.entries.iter().enumerate().skip(start) {
            self.index.insert(wp.name.clone(), i);
        }
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.entries.len(), "index size drifted");
        for (i, wp) in self.entries.iter().enumerate() {
            assert_eq!(self.index.get(&wp.name), Some(&i), "stale index for {}", wp.name);
        }
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
