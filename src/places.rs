//! Venue-search API client
//!
//! This module provides HTTP client functionality for the geocoding and
//! nearby-search endpoints of the Google Places API. Both calls share one
//! client and credential; each converts its own transport failures into
//! error values rather than panicking.

use crate::config::PlacesConfig;
use crate::models::{Coordinates, Location, VenueCandidate};
use crate::{MeetupAiError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// HTTP client for the geocoding + nearby-search API
pub struct PlacesApiClient {
    client: Client,
    api_key: Option<String>,
    geocode_url: String,
    nearby_search_url: String,
    max_candidates: usize,
}

impl PlacesApiClient {
    /// Create a new venue-search API client
    pub fn new(config: &PlacesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("MeetupAI/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MeetupAiError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            geocode_url: config.geocode_url.clone(),
            nearby_search_url: config.nearby_search_url.clone(),
            max_candidates: config.max_candidates,
        })
    }

    /// Resolve a free-text address to a location via the geocoding endpoint.
    ///
    /// Uses the first result the API returns; no disambiguation, no retry.
    #[instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Result<Location> {
        let api_key = self.require_api_key()?;

        info!("Geocoding location: '{}'", address);

        let url = format!(
            "{}?address={}&key={}",
            self.geocode_url,
            urlencoding::encode(address),
            api_key
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(MeetupAiError::Upstream {
                status: format!("HTTP {}", response.status().as_u16()),
            });
        }

        let body: google::GeocodeResponse = response.json().await?;

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MeetupAiError::LocationNotFound(address.to_string()))?;

        let location = Location::new(
            first.formatted_address.unwrap_or_else(|| address.to_string()),
            Coordinates::new(first.geometry.location.lat, first.geometry.location.lng),
        );

        debug!(
            "Resolved '{}' to {} at ({}, {})",
            address,
            location.name,
            location.coordinates.latitude,
            location.coordinates.longitude
        );

        Ok(location)
    }

    /// Search for venues near the given coordinates.
    ///
    /// Results keep the API's relevance ordering and are truncated to the
    /// configured candidate cap.
    #[instrument(skip(self, center))]
    pub async fn nearby_search(
        &self,
        keyword: &str,
        center: Coordinates,
        radius_meters: u32,
    ) -> Result<Vec<VenueCandidate>> {
        let api_key = self.require_api_key()?;

        info!(
            "Searching venues for '{}' within {}m of ({}, {})",
            keyword, radius_meters, center.latitude, center.longitude
        );

        let url = format!(
            "{}?location={}&radius={}&keyword={}&type={}&key={}",
            self.nearby_search_url,
            urlencoding::encode(&center.as_query_param()),
            radius_meters,
            urlencoding::encode(keyword),
            Self::classify_search_type(keyword),
            api_key
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(MeetupAiError::Upstream {
                status: format!("HTTP {}", response.status().as_u16()),
            });
        }

        let body: google::NearbySearchResponse = response.json().await?;

        if body.status != "OK" {
            warn!("Nearby search returned status '{}'", body.status);
            return Err(MeetupAiError::Upstream {
                status: body.status,
            });
        }

        let total = body.results.len();
        let candidates: Vec<VenueCandidate> = body
            .results
            .into_iter()
            .take(self.max_candidates)
            .map(VenueCandidate::from)
            .collect();

        info!(
            "Found {} venues for '{}' (keeping {})",
            total,
            keyword,
            candidates.len()
        );

        Ok(candidates)
    }

    /// Classify the search type from the keyword: a keyword mentioning
    /// "restaurant" searches restaurants, anything else searches generic
    /// establishments.
    #[must_use]
    pub fn classify_search_type(keyword: &str) -> &'static str {
        if keyword.to_lowercase().contains("restaurant") {
            "restaurant"
        } else {
            "establishment"
        }
    }

    fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(MeetupAiError::MissingCredential("GOOGLE_PLACES_API_KEY"))
    }
}

/// Google Places API response structures and conversions
mod google {
    use crate::models::VenueCandidate;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub(super) struct GeocodeResponse {
        #[serde(default)]
        pub results: Vec<GeocodeResult>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct GeocodeResult {
        pub geometry: Geometry,
        pub formatted_address: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct Geometry {
        pub location: LatLng,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct LatLng {
        pub lat: f64,
        pub lng: f64,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct NearbySearchResponse {
        pub status: String,
        #[serde(default)]
        pub results: Vec<PlaceResult>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct PlaceResult {
        pub name: Option<String>,
        pub vicinity: Option<String>,
        pub rating: Option<f32>,
        pub price_level: Option<u8>,
        #[serde(default)]
        pub types: Vec<String>,
        pub place_id: Option<String>,
    }

    impl From<PlaceResult> for VenueCandidate {
        fn from(place: PlaceResult) -> Self {
            VenueCandidate {
                name: place.name.unwrap_or_else(|| "Unknown".to_string()),
                address: place
                    .vicinity
                    .unwrap_or_else(|| "Address not available".to_string()),
                rating: place.rating,
                price_level: place.price_level,
                types: place.types,
                place_id: place.place_id.unwrap_or_default(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Italian restaurant", "restaurant")]
    #[case("RESTAURANT deluxe", "restaurant")]
    #[case("bar", "establishment")]
    #[case("cozy cafe", "establishment")]
    fn test_classify_search_type(#[case] keyword: &str, #[case] expected: &str) {
        assert_eq!(PlacesApiClient::classify_search_type(keyword), expected);
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = PlacesConfig {
            api_key: None,
            ..PlacesConfig::default()
        };
        let client = PlacesApiClient::new(&config).unwrap();
        let err = client.require_api_key().unwrap_err();
        assert!(matches!(err, MeetupAiError::MissingCredential(_)));
    }
}
