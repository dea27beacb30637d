//! Domain types for the itinerary store.
//!
//! Value types enforce their invariants at construction time, so code that
//! receives a `Coordinate` can trust it is in range.

mod coordinate;
mod position;
mod waypoint;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use position::Position;
pub use waypoint::{NewWaypoint, UNKNOWN_TRANSPORT, Waypoint};
