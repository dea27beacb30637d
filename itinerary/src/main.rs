use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use itinerary::report::ItineraryReport;
use itinerary::resolver::{NominatimConfig, NominatimResolver};
use itinerary::store::{ItineraryStore, StoreConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Snapshot location and optional export target from environment
    let config = match std::env::var_os("ITINERARY_SNAPSHOT") {
        Some(path) => StoreConfig::new(PathBuf::from(path)),
        None => StoreConfig::default(),
    };
    let export = std::env::var_os("ITINERARY_EXPORT").map(PathBuf::from);

    let mut nominatim = NominatimConfig::default();
    if let Ok(url) = std::env::var("NOMINATIM_URL") {
        nominatim = nominatim.with_base_url(url);
    }

    let resolver = match NominatimResolver::new(nominatim) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("Failed to create geocoding client: {e}");
            std::process::exit(1);
        }
    };

    let store = ItineraryStore::open(config, resolver);
    if let Some(e) = store.load_error() {
        eprintln!("Warning: {e}");
    }

    print!("{}", ItineraryReport::build(&store));

    if let Some(path) = export {
        match store.export_csv(&path) {
            Ok(()) => println!("\nTravel data exported to {}.", path.display()),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
