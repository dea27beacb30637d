//! Ordered travel itinerary store.
//!
//! Keeps a named, ordered list of waypoints (country, coordinate, days,
//! transport) under positional insert/move/remove, computes trip analytics
//! over that order, and persists a JSON snapshot after every change.

pub mod domain;
pub mod report;
pub mod resolver;
pub mod store;
