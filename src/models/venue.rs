//! Venue candidate model and presentation helpers

use serde::{Deserialize, Serialize};

/// Types the places API attaches to almost every result; they carry no
/// cuisine information and are filtered out before display.
const GENERIC_TYPES: [&str; 4] = ["restaurant", "food", "point_of_interest", "establishment"];

/// One result from the nearby-places search, capped and formatted for
/// presentation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VenueCandidate {
    /// Venue name
    pub name: String,
    /// Street address (the API's `vicinity` field)
    pub address: String,
    /// Average user rating out of 5, when the API provides one
    pub rating: Option<f32>,
    /// Price level on the API's 0-4 scale, when provided
    pub price_level: Option<u8>,
    /// Raw type tags from the API
    pub types: Vec<String>,
    /// Stable place identifier
    pub place_id: String,
}

impl VenueCandidate {
    /// Render the price level as repeated `$` markers.
    ///
    /// A missing or zero price level renders as explicit text, never as an
    /// empty string.
    #[must_use]
    pub fn format_price_level(&self) -> String {
        match self.price_level {
            Some(level) if level > 0 => "$".repeat(usize::from(level.min(4))),
            _ => "Price not available".to_string(),
        }
    }

    /// Format the rating out of 5
    #[must_use]
    pub fn format_rating(&self) -> String {
        match self.rating {
            Some(rating) => format!("{rating:.1}/5"),
            None => "No rating".to_string(),
        }
    }

    /// Derive a human-readable cuisine from the API's type tags
    /// (`"italian_restaurant"` becomes `"Italian"`)
    #[must_use]
    pub fn cuisine(&self) -> String {
        let specific = self
            .types
            .iter()
            .find(|t| !GENERIC_TYPES.contains(&t.as_str()));

        match specific {
            Some(tag) => tag
                .trim_end_matches("_restaurant")
                .split('_')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            None => "Restaurant".to_string(),
        }
    }

    /// Direct Google Maps link for this venue
    #[must_use]
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/place/?q=place_id:{}",
            self.place_id
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render the candidate list as the text block handed to the venue
/// researcher role
#[must_use]
pub fn render_venue_report(candidates: &[VenueCandidate], keyword: &str, near: &str) -> String {
    let mut report = format!("Real venue data for '{keyword}' near '{near}':\n\n");

    for (i, venue) in candidates.iter().enumerate() {
        report.push_str(&format!("{}. **{}**\n", i + 1, venue.name));
        report.push_str(&format!("   - Address: {}\n", venue.address));
        report.push_str(&format!("   - Rating: {}\n", venue.format_rating()));
        report.push_str(&format!("   - Price Level: {}\n", venue.format_price_level()));
        report.push_str(&format!("   - Cuisine: {}\n", venue.cuisine()));
        report.push_str(&format!("   - Types: {}\n", venue.types.join(", ")));
        report.push_str(&format!("   - Map: {}\n\n", venue.maps_url()));
    }

    report
}
