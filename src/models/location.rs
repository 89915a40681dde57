//! Location models for geographic coordinates and resolved places

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as the `lat,lng` pair the nearby-search API expects
    #[must_use]
    pub fn as_query_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A resolved location: coordinates plus the display name the geocoder
/// echoed back
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Display name (formatted address or the original query text)
    pub name: String,
    /// Resolved coordinates
    pub coordinates: Coordinates,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        Self { name, coordinates }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!(
            "{:.4}, {:.4}",
            self.coordinates.latitude, self.coordinates.longitude
        )
    }
}
