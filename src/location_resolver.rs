//! Location Resolution Module
//!
//! Resolves free-text location input (place names, suburbs, addresses)
//! into a structured Location via the geocoding API.

use crate::models::Location;
use crate::places::PlacesApiClient;
use crate::{MeetupAiError, Result};
use tracing::debug;

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a free-text location into a structured Location.
    ///
    /// Fails explicitly when the geocoder has no results; never falls back
    /// to a default coordinate.
    pub async fn resolve(client: &PlacesApiClient, location_text: &str) -> Result<Location> {
        let trimmed = location_text.trim();
        if trimmed.is_empty() {
            return Err(MeetupAiError::validation("Location cannot be empty"));
        }

        debug!("Resolving location input: {:?}", trimmed);

        let location = client.geocode(trimmed).await?;

        debug!(
            "Resolved location: {} at ({}, {})",
            location.name, location.coordinates.latitude, location.coordinates.longitude
        );

        Ok(location)
    }
}
