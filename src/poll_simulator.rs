//! Simulated poll responses
//!
//! Stand-in for a real polling system: produces deterministic
//! per-participant availability, cuisine, and budget records by cycling
//! fixed sample pools.

use crate::models::PollRecord;
use crate::{MeetupAiError, Result};

const SAMPLE_NAMES: [&str; 8] = [
    "Alex", "Jordan", "Casey", "Morgan", "Taylor", "Riley", "Avery", "Quinn",
];

const SAMPLE_AVAILABILITIES: [[&str; 2]; 5] = [
    ["Friday 7pm", "Saturday 6pm"],
    ["Friday 8pm", "Sunday 7pm"],
    ["Saturday 6pm", "Sunday 7pm"],
    ["Friday 7pm", "Sunday 6pm"],
    ["Saturday 7pm", "Sunday 8pm"],
];

const SAMPLE_CUISINES: [&str; 6] = [
    "Italian",
    "Asian",
    "Mexican",
    "No preference",
    "Mediterranean",
    "American",
];

const SAMPLE_BUDGETS: [u32; 5] = [20, 25, 30, 35, 40];

/// Generator for synthetic poll data
pub struct PollSimulator;

impl PollSimulator {
    /// Generate one poll record per participant.
    ///
    /// Record `i` takes entry `i % pool_len` from each sample pool. When
    /// the participant count exceeds the name pool, names wrap and repeats
    /// gain a ` #n` suffix so every record stays distinguishable.
    pub fn generate(participant_count: usize) -> Result<Vec<PollRecord>> {
        if participant_count == 0 {
            return Err(MeetupAiError::validation(
                "Participant count must be at least 1",
            ));
        }

        let records = (0..participant_count)
            .map(|i| {
                let base_name = SAMPLE_NAMES[i % SAMPLE_NAMES.len()];
                let participant_name = if i < SAMPLE_NAMES.len() {
                    base_name.to_string()
                } else {
                    format!("{} #{}", base_name, i / SAMPLE_NAMES.len() + 1)
                };

                let availability = SAMPLE_AVAILABILITIES[i % SAMPLE_AVAILABILITIES.len()];

                PollRecord {
                    participant_name,
                    available_slots: availability.iter().map(|s| (*s).to_string()).collect(),
                    cuisine_preference: SAMPLE_CUISINES[i % SAMPLE_CUISINES.len()].to_string(),
                    budget_per_person: SAMPLE_BUDGETS[i % SAMPLE_BUDGETS.len()],
                }
            })
            .collect();

        Ok(records)
    }
}
