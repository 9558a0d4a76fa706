//! Place Search
//!
//! Free-text location lookup used to recenter the map before drawing.
//! The search never touches the path editor's state: a hit moves the
//! viewport, a miss or a network failure is logged and leaves the view
//! exactly where it was.
//!
//! Requests have no cancellation; a newer query simply issues a new
//! request. [`SearchSession`] tags every submission with a generation
//! so a slow response for an old query can never overwrite the view of
//! a newer one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::map::MapViewport;

/// Seed query shown before the user types anything.
pub const DEFAULT_SEARCH_QUERY: &str = "Toronto, ON";

/// Zoom applied when a search hit recenters the map.
pub const SEARCH_RESULT_ZOOM: u8 = 18;

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("place search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("place search returned status {0}")]
    Status(u16),
}

/// One search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub formatted_address: Option<String>,
    pub location: PlaceLocation,
}

/// The places API names coordinates differently from the map wire
/// format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<PlaceLocation> for GeoPoint {
    fn from(loc: PlaceLocation) -> Self {
        GeoPoint::new(loc.latitude, loc.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Debug, Serialize)]
struct SearchTextRequest<'a> {
    #[serde(rename = "textQuery")]
    text_query: &'a str,
}

/// Text-based place lookup capability.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search_text(&self, query: &str) -> Result<Vec<Place>, GeocodeError>;
}

const PLACES_SEARCH_URL: &str = "https://places.googleapis.com/v1/places:searchText";

/// HTTP place search against the Places text-search endpoint.
pub struct HttpPlaceSearch {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl HttpPlaceSearch {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: PLACES_SEARCH_URL.to_string(),
        }
    }

    /// Point at a different endpoint (tests, proxies).
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
        }
    }
}

#[async_trait]
impl PlaceSearch for HttpPlaceSearch {
    async fn search_text(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .header(
                "X-Goog-FieldMask",
                "places.formattedAddress,places.location",
            )
            .json(&SearchTextRequest { text_query: query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body: SearchTextResponse = response.json().await?;
        Ok(body.places)
    }
}

/// Tracks the in-flight search and guards against stale completions.
#[derive(Debug)]
pub struct SearchSession {
    query: String,
    generation: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: DEFAULT_SEARCH_QUERY.to_string(),
            generation: 0,
        }
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Submit a query: a blank submission keeps the current query and
    /// issues nothing. Returns the generation token the completion must
    /// present.
    pub fn submit(&mut self, query: &str) -> Option<u64> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.query = trimmed.to_string();
        self.generation += 1;
        Some(self.generation)
    }

    /// Apply a completed lookup to the viewport.
    ///
    /// Returns true when the viewport moved. Stale generations, errors
    /// and empty result sets all leave the viewport unchanged; failures
    /// are diagnostic only and never propagate.
    pub fn apply(
        &self,
        generation: u64,
        result: Result<Vec<Place>, GeocodeError>,
        viewport: &mut MapViewport,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "ignoring stale place search completion (generation {} < {})",
                generation,
                self.generation
            );
            return false;
        }
        let places = match result {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!("place search for {:?} failed: {}", self.query, e);
                return false;
            }
        };
        let Some(first) = places.into_iter().next() else {
            tracing::warn!("place search for {:?} returned no results", self.query);
            return false;
        };

        viewport.center = first.location.into();
        viewport.zoom = SEARCH_RESULT_ZOOM;
        true
    }
}
