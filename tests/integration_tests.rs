//! Integration tests for the MeetupAI pipeline
//!
//! The places API is mocked at the HTTP level with wiremock; the completion
//! backend is mocked with a recording implementation so tests can assert
//! stage ordering and the data each stage received.

use async_trait::async_trait;
use meetupai::{
    CompletionBackend, MeetupAiConfig, MeetupAiError, PipelineOrchestrator, PlacesApiClient,
    RoleProfile, TaskSpec,
};
use serde_json::{Value, json};
use std::sync::Mutex;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const NEARBY_PATH: &str = "/maps/api/place/nearbysearch/json";

fn test_config(server_uri: &str, api_key: Option<&str>) -> MeetupAiConfig {
    let mut config = MeetupAiConfig::default();
    config.places.api_key = api_key.map(String::from);
    config.places.geocode_url = format!("{server_uri}{GEOCODE_PATH}");
    config.places.nearby_search_url = format!("{server_uri}{NEARBY_PATH}");
    config
}

fn brunswick_geocode_body() -> Value {
    json!({
        "status": "OK",
        "results": [
            {
                "formatted_address": "Brunswick VIC, Australia",
                "geometry": { "location": { "lat": -37.77, "lng": 144.96 } }
            },
            {
                "formatted_address": "Brunswick, ME, USA",
                "geometry": { "location": { "lat": 43.91, "lng": -69.97 } }
            }
        ]
    })
}

fn nearby_body(count: usize) -> Value {
    let results: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "name": format!("Venue {i}"),
                "vicinity": format!("{i} Sydney Rd, Brunswick"),
                "rating": 4.0 + (i as f64) * 0.1,
                "price_level": if i % 2 == 0 { Value::from(2) } else { Value::Null },
                "types": ["restaurant", "italian_restaurant"],
                "place_id": format!("place-{i}")
            })
        })
        .collect();

    json!({ "status": "OK", "results": results })
}

async fn mock_places(server: &MockServer, venue_count: usize) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(brunswick_geocode_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(venue_count)))
        .mount(server)
        .await;
}

/// Completion backend that records every call and returns canned text
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<RecordedCall>>,
}

struct RecordedCall {
    role: String,
    description: String,
    context: Option<String>,
}

impl RecordingBackend {
    fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| (c.role.clone(), c.context.clone()))
            .collect()
    }

    fn descriptions(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.description.clone())
            .collect()
    }
}

#[async_trait]
impl CompletionBackend for RecordingBackend {
    async fn complete(
        &self,
        profile: &RoleProfile,
        task: &TaskSpec,
        context: Option<&str>,
    ) -> meetupai::Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            role: profile.name.to_string(),
            description: task.description.clone(),
            context: context.map(String::from),
        });
        Ok(format!("{} output", profile.name))
    }
}

/// Completion backend that always fails
struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(
        &self,
        _profile: &RoleProfile,
        _task: &TaskSpec,
        _context: Option<&str>,
    ) -> meetupai::Result<String> {
        Err(MeetupAiError::backend("simulated outage"))
    }
}

#[tokio::test]
async fn geocode_returns_the_first_result() {
    let server = MockServer::start().await;
    mock_places(&server, 3).await;

    let config = test_config(&server.uri(), Some("test-key"));
    let client = PlacesApiClient::new(&config.places).unwrap();

    let location = client.geocode("Brunswick, VIC, Australia").await.unwrap();
    assert_eq!(location.name, "Brunswick VIC, Australia");
    assert_eq!(location.coordinates.latitude, -37.77);
    assert_eq!(location.coordinates.longitude, 144.96);
}

#[tokio::test]
async fn geocode_with_no_results_is_location_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), Some("test-key"));
    let client = PlacesApiClient::new(&config.places).unwrap();

    let err = client.geocode("Nowhereville").await.unwrap_err();
    assert!(matches!(err, MeetupAiError::LocationNotFound(_)));
    assert!(err.to_string().contains("Nowhereville"));
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let server = MockServer::start().await;
    mock_places(&server, 3).await;

    let config = test_config(&server.uri(), None);
    let client = PlacesApiClient::new(&config.places).unwrap();

    let err = client.geocode("Brunswick").await.unwrap_err();
    assert!(matches!(err, MeetupAiError::MissingCredential(_)));

    let err = client
        .nearby_search("restaurant", meetupai::Coordinates::new(-37.77, 144.96), 5000)
        .await
        .unwrap_err();
    assert!(matches!(err, MeetupAiError::MissingCredential(_)));

    // No HTTP call may be attempted without a credential
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn nearby_search_truncates_to_five_preserving_order() {
    let server = MockServer::start().await;
    mock_places(&server, 7).await;

    let config = test_config(&server.uri(), Some("test-key"));
    let client = PlacesApiClient::new(&config.places).unwrap();

    let candidates = client
        .nearby_search("restaurant", meetupai::Coordinates::new(-37.77, 144.96), 5000)
        .await
        .unwrap();

    assert_eq!(candidates.len(), 5);
    let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Venue 1", "Venue 2", "Venue 3", "Venue 4", "Venue 5"]);
}

#[tokio::test]
async fn nearby_search_reports_non_ok_status_as_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "REQUEST_DENIED", "results": [] })),
        )
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), Some("test-key"));
    let client = PlacesApiClient::new(&config.places).unwrap();

    let err = client
        .nearby_search("restaurant", meetupai::Coordinates::new(-37.77, 144.96), 5000)
        .await
        .unwrap_err();

    match err {
        MeetupAiError::Upstream { status } => assert_eq!(status, "REQUEST_DENIED"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn analysis_always_runs_before_recommendation() {
    let server = MockServer::start().await;
    mock_places(&server, 5).await;

    let config = test_config(&server.uri(), Some("test-key"));
    let places = PlacesApiClient::new(&config.places).unwrap();
    let backend = RecordingBackend::default();
    let orchestrator = PipelineOrchestrator::new(&places, &backend, &config);

    orchestrator
        .run("Brunswick, VIC, Australia", 5)
        .await
        .unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "Group Preference Analyst");
    assert_eq!(calls[1].0, "Venue Research Specialist");

    // The analyst runs without upstream context; the researcher receives
    // the analyst's output
    assert_eq!(calls[0].1, None);
    assert_eq!(
        calls[1].1.as_deref(),
        Some("Group Preference Analyst output")
    );
}

#[tokio::test]
async fn end_to_end_brunswick_scenario() {
    let server = MockServer::start().await;
    mock_places(&server, 7).await;

    let config = test_config(&server.uri(), Some("test-key"));
    let places = PlacesApiClient::new(&config.places).unwrap();
    let backend = RecordingBackend::default();
    let orchestrator = PipelineOrchestrator::new(&places, &backend, &config);

    let result = orchestrator
        .run("Brunswick, VIC, Australia", 5)
        .await
        .unwrap();

    // Seven mocked venues are capped at five, order preserved
    assert_eq!(result.candidates.len(), 5);
    assert_eq!(result.candidates[0].name, "Venue 1");
    assert_eq!(result.candidates[4].name, "Venue 5");
    assert_eq!(result.location.name, "Brunswick VIC, Australia");

    // Both stage outputs land in the final artifact
    assert_eq!(result.consensus, "Group Preference Analyst output");
    assert_eq!(result.recommendation, "Venue Research Specialist output");

    let rendered = result.render();
    assert!(rendered.contains("## Here are the venue recommendations"));
    assert!(rendered.contains("Venue Research Specialist output"));

    // The analyst saw five poll records cycling the fixed sample pools
    let descriptions = backend.descriptions();
    assert!(descriptions[0].contains("Poll Results from 5 people"));
    for name in ["Alex", "Jordan", "Casey", "Morgan", "Taylor"] {
        assert!(descriptions[0].contains(name), "missing participant {name}");
    }

    // The researcher saw the capped venue list and the group size
    assert!(descriptions[1].contains("Group Size: 5"));
    assert!(descriptions[1].contains("Venue 5"));
    assert!(!descriptions[1].contains("Venue 6"));
}

#[tokio::test]
async fn backend_failure_is_fatal_to_the_run() {
    let server = MockServer::start().await;
    mock_places(&server, 5).await;

    let config = test_config(&server.uri(), Some("test-key"));
    let places = PlacesApiClient::new(&config.places).unwrap();
    let backend = FailingBackend;
    let orchestrator = PipelineOrchestrator::new(&places, &backend, &config);

    let err = orchestrator
        .run("Brunswick, VIC, Australia", 5)
        .await
        .unwrap_err();
    assert!(matches!(err, MeetupAiError::Backend(_)));
}

#[tokio::test]
async fn pipeline_falls_back_to_generic_search_on_zero_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(brunswick_geocode_body()))
        .mount(&server)
        .await;

    // The cuisine-specific search finds nothing; the generic one succeeds
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("keyword", "Italian restaurant"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("keyword", "restaurant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(2)))
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri(), Some("test-key"));
    config.places.default_keyword = "Italian restaurant".to_string();

    let places = PlacesApiClient::new(&config.places).unwrap();
    let backend = RecordingBackend::default();
    let orchestrator = PipelineOrchestrator::new(&places, &backend, &config);

    let result = orchestrator
        .run("Brunswick, VIC, Australia", 5)
        .await
        .unwrap();

    assert_eq!(result.candidates.len(), 2);
}
