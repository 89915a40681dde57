//! Configuration management for the `MeetupAI` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. The configuration
//! is built once at startup and handed explicitly to the components that
//! need it; nothing reads the environment at call time.

use crate::MeetupAiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `MeetupAI` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetupAiConfig {
    /// Venue-search (geocoding + nearby places) API configuration
    #[serde(default)]
    pub places: PlacesConfig,
    /// Text-generation backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Venue-search API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Google Places API key
    pub api_key: Option<String>,
    /// Base URL for the geocoding endpoint
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,
    /// Base URL for the nearby-search endpoint
    #[serde(default = "default_nearby_search_url")]
    pub nearby_search_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_places_timeout")]
    pub timeout_seconds: u32,
    /// Search radius in meters
    #[serde(default = "default_search_radius")]
    pub radius_meters: u32,
    /// Maximum number of venue candidates retained per search
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Keyword used for the initial venue search
    #[serde(default = "default_search_keyword")]
    pub default_keyword: String,
}

/// Text-generation backend configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// API key for the completion service
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible completion API
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_backend_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Number of simulated poll participants
    #[serde(default = "default_group_size")]
    pub group_size: usize,
}

// Default value functions
fn default_geocode_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_nearby_search_url() -> String {
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json".to_string()
}

fn default_places_timeout() -> u32 {
    30
}

fn default_search_radius() -> u32 {
    5000
}

fn default_max_candidates() -> usize {
    5
}

fn default_search_keyword() -> String {
    "restaurant".to_string()
}

fn default_backend_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_backend_model() -> String {
    "gpt-4o".to_string()
}

fn default_backend_timeout() -> u32 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_group_size() -> usize {
    5
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocode_url: default_geocode_url(),
            nearby_search_url: default_nearby_search_url(),
            timeout_seconds: default_places_timeout(),
            radius_meters: default_search_radius(),
            max_candidates: default_max_candidates(),
            default_keyword: default_search_keyword(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_backend_base_url(),
            model: default_backend_model(),
            timeout_seconds: default_backend_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            group_size: default_group_size(),
        }
    }
}

impl MeetupAiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with MEETUPAI_ prefix,
        // e.g. MEETUPAI_PLACES__API_KEY, MEETUPAI_BACKEND__MODEL
        builder = builder.add_source(
            Environment::with_prefix("MEETUPAI")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: MeetupAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_credential_fallbacks();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meetupai").join("config.toml"))
    }

    /// Fall back to the conventional credential variables when the
    /// prefixed ones are not set
    pub fn apply_credential_fallbacks(&mut self) {
        if self.places.api_key.is_none() {
            self.places.api_key = std::env::var("GOOGLE_PLACES_API_KEY").ok();
        }
        if self.backend.api_key.is_none() {
            self.backend.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.places.timeout_seconds == 0 || self.places.timeout_seconds > 300 {
            return Err(MeetupAiError::config(
                "Places API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.backend.timeout_seconds == 0 || self.backend.timeout_seconds > 600 {
            return Err(MeetupAiError::config(
                "Backend timeout must be between 1 and 600 seconds",
            )
            .into());
        }

        if self.places.radius_meters < 100 || self.places.radius_meters > 50_000 {
            return Err(MeetupAiError::config(
                "Search radius must be between 100 and 50000 meters",
            )
            .into());
        }

        if self.places.max_candidates == 0 || self.places.max_candidates > 20 {
            return Err(MeetupAiError::config(
                "Maximum venue candidates must be between 1 and 20",
            )
            .into());
        }

        if self.defaults.group_size == 0 {
            return Err(MeetupAiError::config("Group size must be at least 1").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(MeetupAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(MeetupAiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [
            &self.places.geocode_url,
            &self.places.nearby_search_url,
            &self.backend.base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(MeetupAiError::config(format!(
                    "'{url}' is not a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.places.default_keyword.trim().is_empty() {
            return Err(MeetupAiError::config("Default search keyword cannot be empty").into());
        }

        Ok(())
    }
}
