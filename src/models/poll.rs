//! Poll response model and text rendering

use serde::{Deserialize, Serialize};

/// One participant's poll response: availability, cuisine preference, and
/// budget
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PollRecord {
    /// Participant display name
    pub participant_name: String,
    /// Time slots this participant can make, in preference order
    pub available_slots: Vec<String>,
    /// Preferred cuisine (may be "No preference")
    pub cuisine_preference: String,
    /// Budget per person in whole dollars
    pub budget_per_person: u32,
}

impl PollRecord {
    /// Render this record as the per-person block used in the poll report
    #[must_use]
    pub fn format_block(&self) -> String {
        format!(
            "{}:\n   - Available: {}\n   - Cuisine preference: {}\n   - Budget: ${} per person\n",
            self.participant_name,
            self.available_slots.join(", "),
            self.cuisine_preference,
            self.budget_per_person
        )
    }
}

/// Render all poll records as the text block handed to the preference
/// analyst role
#[must_use]
pub fn render_poll_report(records: &[PollRecord]) -> String {
    let mut report = format!("Poll Results from {} people:\n\n", records.len());
    for record in records {
        report.push_str(&record.format_block());
        report.push('\n');
    }
    report
}
