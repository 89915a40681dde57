//! Data models for the MeetupAI application
//!
//! This module contains the core domain models organized by concern:
//! geographic locations, venue candidates, and poll responses.

pub mod location;
pub mod poll;
pub mod venue;

pub use location::{Coordinates, Location};
pub use poll::PollRecord;
pub use venue::VenueCandidate;
