//! Meetup coordination pipeline
//!
//! Drives the full run: resolve the location, search for venues, generate
//! poll data, then feed the two completion stages in order. The preference
//! analysis must finish before the venue recommendation stage starts; the
//! venue branch and poll generation carry no such dependency and run
//! concurrently.

use crate::agents::{self, Capability};
use crate::backend::CompletionBackend;
use crate::config::MeetupAiConfig;
use crate::location_resolver::LocationResolver;
use crate::models::poll::render_poll_report;
use crate::models::venue::render_venue_report;
use crate::models::{Location, PollRecord, VenueCandidate};
use crate::places::PlacesApiClient;
use crate::poll_simulator::PollSimulator;
use crate::tasks;
use crate::{MeetupAiError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{error, info, instrument, warn};

/// Keyword used for the second search when the configured keyword finds
/// nothing
const FALLBACK_KEYWORD: &str = "restaurant";

/// Steps of a pipeline run, in execution order; `Errored` is reachable
/// from every step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Resolving,
    Searching,
    AnalyzingPreferences,
    RecommendingVenues,
    Done,
    Errored,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Resolving => "resolving",
            PipelineStage::Searching => "searching",
            PipelineStage::AnalyzingPreferences => "analyzing_preferences",
            PipelineStage::RecommendingVenues => "recommending_venues",
            PipelineStage::Done => "done",
            PipelineStage::Errored => "errored",
        };
        write!(f, "{name}")
    }
}

/// Terminal artifact of a pipeline run
#[derive(Debug, Clone)]
pub struct RecommendationResult {
    /// The resolved search location
    pub location: Location,
    /// Consensus summary from the preference analysis stage
    pub consensus: String,
    /// Final recommendation text from the venue research stage
    pub recommendation: String,
    /// The venue candidates the recommendation drew from
    pub candidates: Vec<VenueCandidate>,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

impl RecommendationResult {
    /// Render the final report printed to the user
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("################################################\n");
        out.push_str("## Here are the venue recommendations\n");
        out.push_str("################################################\n\n");
        out.push_str(self.recommendation.trim());
        out.push_str("\n\n## Group preference analysis\n\n");
        out.push_str(self.consensus.trim());

        if !self.candidates.is_empty() {
            out.push_str("\n\n## Venues considered\n\n");
            for venue in &self.candidates {
                out.push_str(&format!("- {} ({})\n", venue.name, venue.maps_url()));
            }
        }

        out.push_str(&format!(
            "\nCompleted at {}\n",
            self.completed_at.format("%Y-%m-%d %H:%M UTC")
        ));
        out
    }
}

/// Sequences the venue search and the two completion stages
pub struct PipelineOrchestrator<'a> {
    places: &'a PlacesApiClient,
    backend: &'a dyn CompletionBackend,
    config: &'a MeetupAiConfig,
}

impl<'a> PipelineOrchestrator<'a> {
    /// Create a new orchestrator over the given clients
    #[must_use]
    pub fn new(
        places: &'a PlacesApiClient,
        backend: &'a dyn CompletionBackend,
        config: &'a MeetupAiConfig,
    ) -> Self {
        Self {
            places,
            backend,
            config,
        }
    }

    /// Run the full pipeline for one location and group size.
    ///
    /// Any stage failure is fatal to the run; there is no partial result.
    #[instrument(skip(self))]
    pub async fn run(
        &self,
        location_text: &str,
        participant_count: usize,
    ) -> Result<RecommendationResult> {
        match self.run_stages(location_text, participant_count).await {
            Ok(result) => Ok(result),
            Err(err) => {
                error!(stage = %PipelineStage::Errored, "Pipeline failed: {err}");
                Err(err)
            }
        }
    }

    async fn run_stages(
        &self,
        location_text: &str,
        participant_count: usize,
    ) -> Result<RecommendationResult> {
        println!("🔍 Searching for venues...");

        // The venue branch and poll generation are independent of each
        // other; both must finish before the recommendation stage.
        let (search, poll_records) = tokio::try_join!(
            self.venue_branch(location_text),
            async { PollSimulator::generate(participant_count) },
        )?;
        let (location, candidates) = search;

        println!(
            "✅ Generated simulated poll responses for {} people!",
            poll_records.len()
        );
        println!("✅ Found venue data for {}!", location.name);

        let consensus = self.analyze_preferences(&poll_records).await?;
        let recommendation = self
            .recommend_venues(&location, &candidates, &consensus, participant_count)
            .await?;

        info!(stage = %PipelineStage::Done, "Pipeline complete");

        Ok(RecommendationResult {
            location,
            consensus,
            recommendation,
            candidates,
            completed_at: Utc::now(),
        })
    }

    /// Geocode the location and search for venues near it
    async fn venue_branch(
        &self,
        location_text: &str,
    ) -> Result<(Location, Vec<VenueCandidate>)> {
        info!(stage = %PipelineStage::Resolving, "Resolving location '{}'", location_text);
        let location = LocationResolver::resolve(self.places, location_text).await?;

        info!(stage = %PipelineStage::Searching, "Searching venues near {}", location.name);
        let keyword = self.config.places.default_keyword.as_str();
        let radius = self.config.places.radius_meters;

        let candidates = match self
            .places
            .nearby_search(keyword, location.coordinates, radius)
            .await
        {
            Err(MeetupAiError::Upstream { status })
                if status == "ZERO_RESULTS" && keyword != FALLBACK_KEYWORD =>
            {
                warn!(
                    "No venues for '{}', falling back to '{}'",
                    keyword, FALLBACK_KEYWORD
                );
                self.places
                    .nearby_search(FALLBACK_KEYWORD, location.coordinates, radius)
                    .await?
            }
            other => other?,
        };

        Ok((location, candidates))
    }

    /// Stage 1: run the preference analysis over the poll data
    async fn analyze_preferences(&self, poll_records: &[PollRecord]) -> Result<String> {
        info!(stage = %PipelineStage::AnalyzingPreferences, "Analyzing group preferences");

        let analyst = agents::preference_analyst();
        let poll_report = render_poll_report(poll_records);
        let task = tasks::preference_analysis(&poll_report);

        self.backend.complete(&analyst, &task, None).await
    }

    /// Stage 2: turn the consensus and venue data into recommendations.
    ///
    /// Only runs once the consensus summary exists; the researcher role
    /// receives the venue report only because it declares the venue-data
    /// capability.
    async fn recommend_venues(
        &self,
        location: &Location,
        candidates: &[VenueCandidate],
        consensus: &str,
        participant_count: usize,
    ) -> Result<String> {
        info!(stage = %PipelineStage::RecommendingVenues, "Preparing venue recommendations");

        let researcher = agents::venue_researcher();
        let keyword = self.config.places.default_keyword.as_str();

        let venue_report = if researcher.has(Capability::VenueData) {
            render_venue_report(candidates, keyword, &location.name)
        } else {
            "No venue data available.".to_string()
        };

        let task = tasks::venue_research(participant_count, keyword, &location.name, &venue_report);

        self.backend
            .complete(&researcher, &task, Some(consensus))
            .await
    }
}
