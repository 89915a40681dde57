//! Role profiles for the two pipeline stages
//!
//! Each stage of the pipeline is described by an explicit configuration
//! struct: role name, objective, backstory, and the capabilities the role
//! is entitled to. Capabilities gate which upstream data a role's task may
//! carry.

use indoc::indoc;
use serde::Serialize;

/// Data a role may receive alongside its task description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May receive venue candidate data from the places search
    VenueData,
}

/// The persona/objective/instructions bundle handed to the completion
/// backend for one pipeline stage
#[derive(Debug, Clone, Serialize)]
pub struct RoleProfile {
    /// Role name
    pub name: &'static str,
    /// What the role is trying to achieve
    pub objective: &'static str,
    /// Persona text framing how the role approaches its task
    pub backstory: &'static str,
    /// Data this role is entitled to receive
    pub capabilities: Vec<Capability>,
}

impl RoleProfile {
    /// Whether this role holds the given capability
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Compose the system prompt for this role
    #[must_use]
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a {}. {}\n\nYour objective: {}",
            self.name, self.backstory, self.objective
        )
    }
}

/// The preference analyst: finds group consensus in poll responses
#[must_use]
pub fn preference_analyst() -> RoleProfile {
    RoleProfile {
        name: "Group Preference Analyst",
        objective: "Analyze poll responses to identify group consensus on timing, budget, and preferences",
        backstory: indoc! {"
            As a Group Preference Analyst, you excel at processing poll responses
            and finding consensus among group members. You identify common availability
            windows, budget ranges that work for everyone, and cuisine preferences
            that can accommodate the group. You're skilled at resolving conflicts
            and finding compromises that satisfy the majority."},
        capabilities: vec![],
    }
}

/// The venue researcher: turns consensus plus venue data into
/// recommendations
#[must_use]
pub fn venue_researcher() -> RoleProfile {
    RoleProfile {
        name: "Venue Research Specialist",
        objective: "Analyze and recommend venues for casual meetups based on real API data",
        backstory: indoc! {"
            As a Venue Research Specialist, you excel at analyzing real venue data
            and providing thoughtful recommendations for casual meetups. You consider
            factors like group size, ratings, price levels, location convenience,
            and venue types to make the best recommendations."},
        capabilities: vec![Capability::VenueData],
    }
}
