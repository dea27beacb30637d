//! Itinerary analytics: durations, per-country totals, and distance.
//!
//! Distances are WGS-84 geodesics (Karney's algorithm via `geo`), returned
//! in kilometres and never rounded here.

use geo::GeodesicDistance;

use crate::domain::{Coordinate, Waypoint};

/// Days spent in one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDays {
    pub country: String,
    pub days: u64,
}

/// The hop between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct LegDistance {
    pub from: String,
    pub to: String,
    /// Transport recorded on the arriving waypoint.
    pub transport_mode: String,
    pub distance_km: f64,
}

/// Sum of all durations.
pub fn total_days(waypoints: &[Waypoint]) -> u64 {
    waypoints.iter().map(|wp| u64::from(wp.duration_days)).sum()
}

/// Days per country, most days first.
///
/// Countries with equal totals keep the order in which they first appear.
pub fn days_per_country(waypoints: &[Waypoint]) -> Vec<CountryDays> {
    let mut totals: Vec<CountryDays> = Vec::new();

    for wp in waypoints {
        match totals.iter_mut().find(|c| c.country == wp.country) {
            Some(entry) => entry.days += u64::from(wp.duration_days),
            None => totals.push(CountryDays {
                country: wp.country.clone(),
                days: u64::from(wp.duration_days),
            }),
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    totals.sort_by(|a, b| b.days.cmp(&a.days));
    totals
}

/// Geodesic distance between two coordinates in kilometres.
pub fn geodesic_km(from: Coordinate, to: Coordinate) -> f64 {
    let from: geo::Point<f64> = from.into();
    let to: geo::Point<f64> = to.into();
    from.geodesic_distance(&to) / 1000.0
}

/// One leg per consecutive pair, in travel order.
pub fn legs(waypoints: &[Waypoint]) -> Vec<LegDistance> {
    waypoints
        .windows(2)
        .map(|pair| LegDistance {
            from: pair[0].name.clone(),
            to: pair[1].name.clone(),
            transport_mode: pair[1].transport_mode.clone(),
            distance_km: geodesic_km(pair[0].coordinate, pair[1].coordinate),
        })
        .collect()
}

/// Total distance along the itinerary, or `None` with fewer than two stops.
pub fn total_distance_km(waypoints: &[Waypoint]) -> Option<f64> {
    if waypoints.len() < 2 {
        return None;
    }

    Some(
        waypoints
            .windows(2)
            .map(|pair| geodesic_km(pair[0].coordinate, pair[1].coordinate))
            .sum(),
    )
}
