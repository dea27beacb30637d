//! Itinerary stop types.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Transport mode recorded when the caller doesn't give one.
pub const UNKNOWN_TRANSPORT: &str = "Unknown";

/// One stop on the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Unique key within an itinerary.
    pub name: String,

    /// Free-text country. May disagree with `coordinate` after a country change.
    pub country: String,

    /// Resolved once at creation, never recomputed.
    pub coordinate: Coordinate,

    /// Days spent at this stop.
    pub duration_days: u32,

    /// Transport used to arrive at this stop.
    pub transport_mode: String,
}

impl Waypoint {
    /// Build a waypoint from an insert request and its resolved coordinate.
    pub fn from_request(request: NewWaypoint, coordinate: Coordinate) -> Self {
        Self {
            name: request.name,
            country: request.country,
            coordinate,
            duration_days: request.duration_days,
            transport_mode: request.transport_mode,
        }
    }
}

/// A waypoint waiting for its coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWaypoint {
    pub name: String,
    pub country: String,
    pub duration_days: u32,
    pub transport_mode: String,
}

impl NewWaypoint {
    /// Create a request with the transport mode set to `"Unknown"`.
    pub fn new(name: impl Into<String>, country: impl Into<String>, duration_days: u32) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            duration_days,
            transport_mode: UNKNOWN_TRANSPORT.to_string(),
        }
    }

    /// Set the transport used to arrive.
    pub fn with_transport(mut self, transport_mode: impl Into<String>) -> Self {
        self.transport_mode = transport_mode.into();
        self
    }

    /// Free-text query handed to the coordinate resolver.
    pub fn resolver_query(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}
