//! In-memory resolver for tests and offline use.
//!
//! Serves coordinates from a fixed table as if they came from a live
//! geocoding service.

use std::cell::Cell;
use std::collections::HashMap;

use crate::domain::Coordinate;

use super::{CoordinateResolver, Resolution};

/// Resolver backed by a fixed query → coordinate table.
///
/// Lookups are case-insensitive and ignore surrounding whitespace. Unknown
/// queries resolve to `NotFound`; `timing_out` makes every lookup time out.
#[derive(Debug, Default)]
pub struct StaticResolver {
    places: HashMap<String, Coordinate>,
    timing_out: bool,
    calls: Cell<usize>,
}

impl StaticResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver whose every request times out.
    pub fn timing_out() -> Self {
        Self {
            timing_out: true,
            ..Self::default()
        }
    }

    /// Register a place.
    pub fn with_place(mut self, query: &str, coordinate: Coordinate) -> Self {
        self.insert(query, coordinate);
        self
    }

    /// Register a place.
    pub fn insert(&mut self, query: &str, coordinate: Coordinate) {
        self.places.insert(normalise(query), coordinate);
    }

    /// Number of `resolve` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

fn normalise(query: &str) -> String {
    query.trim().to_lowercase()
}

impl CoordinateResolver for StaticResolver {
    fn resolve(&self, query: &str) -> Resolution {
        self.calls.set(self.calls.get() + 1);

        if self.timing_out {
            return Resolution::TimedOut;
        }

        match self.places.get(&normalise(query)) {
            Some(c) => Resolution::Found(*c),
            None => Resolution::NotFound,
        }
    }
}
