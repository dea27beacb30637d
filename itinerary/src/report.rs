//! Structured itinerary summary.
//!
//! Collects everything the binary prints in one value so it can be tested
//! without capturing stdout.

use std::fmt;

use crate::domain::Waypoint;
use crate::resolver::CoordinateResolver;
use crate::store::{CountryDays, ItineraryStore, LegDistance};

/// Snapshot of the itinerary and its analytics.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryReport {
    /// Waypoints in travel order.
    pub stops: Vec<Waypoint>,
    pub total_days: u64,
    pub days_per_country: Vec<CountryDays>,
    pub legs: Vec<LegDistance>,
    /// `None` with fewer than two stops.
    pub total_distance_km: Option<f64>,
}

impl ItineraryReport {
    /// Build a report from the store's current state.
    pub fn build<R: CoordinateResolver>(store: &ItineraryStore<R>) -> Self {
        Self {
            stops: store.waypoints().to_vec(),
            total_days: store.total_days(),
            days_per_country: store.days_per_country(),
            legs: store.legs(),
            total_distance_km: store.total_distance_km().ok(),
        }
    }
}

impl fmt::Display for ItineraryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stops.is_empty() {
            return writeln!(f, "No travel locations stored.");
        }

        writeln!(f, "Travel locations:")?;
        for (i, wp) in self.stops.iter().enumerate() {
            writeln!(
                f,
                "{:>3}. {} ({}) {} - {} days, via {}",
                i + 1,
                wp.name,
                wp.country,
                wp.coordinate,
                wp.duration_days,
                display_transport(&wp.transport_mode),
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Total travel days: {}", self.total_days)?;

        writeln!(f)?;
        writeln!(f, "Days per country:")?;
        for c in &self.days_per_country {
            writeln!(f, "  {}: {} days", c.country, c.days)?;
        }

        if !self.legs.is_empty() {
            writeln!(f)?;
            writeln!(f, "Legs:")?;
            for leg in &self.legs {
                writeln!(
                    f,
                    "  {} -> {} ({}): {:.2} km",
                    leg.from,
                    leg.to,
                    display_transport(&leg.transport_mode),
                    leg.distance_km
                )?;
            }
        }

        writeln!(f)?;
        match self.total_distance_km {
            Some(km) => writeln!(f, "Total travel distance: {km:.2} km"),
            None => writeln!(f, "Not enough locations to calculate distance."),
        }
    }
}

fn display_transport(mode: &str) -> &str {
    if mode.is_empty() { "unknown" } else { mode }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, NewWaypoint, Position};
    use crate::resolver::StaticResolver;
    use crate::store::StoreConfig;
    use tempfile::tempdir;

    fn store_with(
        dir: &tempfile::TempDir,
        stops: &[(&str, &str, u32, f64, f64)],
    ) -> ItineraryStore<StaticResolver> {
        let mut resolver = StaticResolver::new();
        for (name, country, _, lat, lon) in stops {
            resolver.insert(
                &format!("{name}, {country}"),
                Coordinate::new(*lat, *lon).unwrap(),
            );
        }

        let mut store =
            ItineraryStore::open(StoreConfig::new(dir.path().join("trip.json")), resolver);
        for (name, country, days, _, _) in stops {
            store
                .insert(NewWaypoint::new(*name, *country, *days), Position::End)
                .unwrap();
        }
        store
    }

    #[test]
    fn empty_report() {
        let dir = tempdir().unwrap();
        let report = ItineraryReport::build(&store_with(&dir, &[]));

        assert!(report.stops.is_empty());
        assert_eq!(report.total_days, 0);
        assert!(report.total_distance_km.is_none());
        assert_eq!(report.to_string(), "No travel locations stored.\n");
    }

    #[test]
    fn single_stop_has_no_distance() {
        let dir = tempdir().unwrap();
        let report = ItineraryReport::build(&store_with(&dir, &[("P1", "X", 2, 0.0, 0.0)]));

        assert!(report.legs.is_empty());
        assert!(report.total_distance_km.is_none());
        assert!(
            report
                .to_string()
                .contains("Not enough locations to calculate distance.")
        );
    }

    #[test]
    fn report_rounds_distance_to_two_places() {
        let dir = tempdir().unwrap();
        let store = store_with(&dir, &[("P1", "X", 2, 0.0, 0.0), ("P2", "Y", 3, 0.0, 1.0)]);
        let report = ItineraryReport::build(&store);

        let text = report.to_string();
        assert!(text.contains("  1. P1 (X) (0, 0) - 2 days, via Unknown"));
        assert!(text.contains("Total travel days: 5"));
        assert!(text.contains("P1 -> P2 (Unknown): 111.32 km"));
        assert!(text.contains("Total travel distance: 111.32 km"));

        // The structured value keeps full precision
        let km = report.total_distance_km.unwrap();
        assert!((km - 111.32).abs() > 0.0);
    }

    #[test]
    fn countries_listed_most_days_first() {
        let dir = tempdir().unwrap();
        let store = store_with(
            &dir,
            &[
                ("Hue", "Vietnam", 2, 16.4637, 107.5909),
                ("Bali", "Indonesia", 18, -8.4095, 115.1889),
            ],
        );
        let text = ItineraryReport::build(&store).to_string();

        let bali = text.find("  Indonesia: 18 days").unwrap();
        let hue = text.find("  Vietnam: 2 days").unwrap();
        assert!(bali < hue);
    }

    #[test]
    fn blank_transport_shows_unknown() {
        assert_eq!(display_transport(""), "unknown");
        assert_eq!(display_transport("Plane"), "Plane");
    }
}
