//! Nominatim (OpenStreetMap) geocoding resolver.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Coordinate, InvalidCoordinate};

use super::{CoordinateResolver, Resolution};

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default user agent. Nominatim's usage policy requires an identifying one.
const DEFAULT_USER_AGENT: &str = "travel_planner";

/// Configuration for the Nominatim resolver.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl NominatimConfig {
    /// Create a config pointing at the public instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Errors from the Nominatim HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum NominatimError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}")]
    Api { status: u16 },

    /// Failed to parse a coordinate component
    #[error("unparseable {field}: {value}")]
    Parse { field: &'static str, value: String },

    /// Service returned a coordinate out of range
    #[error(transparent)]
    Coordinate(#[from] InvalidCoordinate),
}

impl NominatimError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, NominatimError::Http(e) if e.is_timeout())
    }
}

/// Raw Nominatim search hit. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Blocking client for the Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimResolver {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl NominatimResolver {
    /// Create a new resolver with the given configuration.
    pub fn new(config: NominatimConfig) -> Result<Self, NominatimError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Look up a place, returning `None` when Nominatim has no match.
    pub fn search(&self, query: &str) -> Result<Option<Coordinate>, NominatimError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        debug!(%query, "geocoding");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(NominatimError::Api {
                status: status.as_u16(),
            });
        }

        let hits: Vec<SearchHit> = response.json()?;
        hits.first().map(parse_hit).transpose()
    }
}

fn parse_hit(hit: &SearchHit) -> Result<Coordinate, NominatimError> {
    let latitude = hit.lat.parse().map_err(|_| NominatimError::Parse {
        field: "latitude",
        value: hit.lat.clone(),
    })?;
    let longitude = hit.lon.parse().map_err(|_| NominatimError::Parse {
        field: "longitude",
        value: hit.lon.clone(),
    })?;

    Ok(Coordinate::new(latitude, longitude)?)
}

impl CoordinateResolver for NominatimResolver {
    fn resolve(&self, query: &str) -> Resolution {
        let query = query.trim();
        if query.is_empty() {
            return Resolution::NotFound;
        }

        match self.search(query) {
            Ok(Some(coordinate)) => {
                debug!(%query, %coordinate, "geocoded");
                Resolution::Found(coordinate)
            }
            Ok(None) => {
                warn!(%query, "no coordinates found");
                Resolution::NotFound
            }
            Err(e) if e.is_timeout() => {
                warn!(%query, "geocoding request timed out");
                Resolution::TimedOut
            }
            // The boundary only distinguishes found / not found / timed out.
            Err(e) => {
                warn!(%query, error = %e, "geocoding failed");
                Resolution::NotFound
            }
        }
    }
}
