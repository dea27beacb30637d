//! Coordinate resolution boundary.
//!
//! The store turns a free-text place description into a `Coordinate` through
//! the `CoordinateResolver` trait. The call is blocking and bounded by the
//! resolver's own timeout.

mod fixed;
mod nominatim;

pub use fixed::StaticResolver;
pub use nominatim::{NominatimConfig, NominatimError, NominatimResolver};

use crate::domain::Coordinate;

/// Outcome of a single resolution request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The place was found.
    Found(Coordinate),

    /// The service had no match for the query.
    NotFound,

    /// The service didn't answer within the timeout.
    TimedOut,
}

/// Trait for resolving place descriptions to coordinates.
///
/// This abstraction allows the store to be tested without network access.
pub trait CoordinateResolver {
    /// Resolve a free-text place description, e.g. `"Hue, Vietnam"`.
    fn resolve(&self, query: &str) -> Resolution;
}

impl<R: CoordinateResolver + ?Sized> CoordinateResolver for &R {
    fn resolve(&self, query: &str) -> Resolution {
        (**self).resolve(query)
    }
}
