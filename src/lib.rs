//! `MeetupAI` - Intelligent group meetup coordination
//!
//! This library provides the core functionality for analyzing group poll
//! responses, searching for nearby venues, and producing venue
//! recommendations through a two-stage completion pipeline.

pub mod agents;
pub mod backend;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod pipeline;
pub mod places;
pub mod poll_simulator;
pub mod tasks;

// Re-export core types for public API
pub use agents::{Capability, RoleProfile};
pub use backend::{CompletionBackend, OpenAiBackend};
pub use config::MeetupAiConfig;
pub use error::MeetupAiError;
pub use location_resolver::LocationResolver;
pub use models::{Coordinates, Location, PollRecord, VenueCandidate};
pub use pipeline::{PipelineOrchestrator, PipelineStage, RecommendationResult};
pub use places::PlacesApiClient;
pub use poll_simulator::PollSimulator;
pub use tasks::TaskSpec;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MeetupAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
