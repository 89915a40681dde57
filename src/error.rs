//! Error types and handling for the `MeetupAI` application

use thiserror::Error;

/// Main error type for the `MeetupAI` application
#[derive(Error, Debug)]
pub enum MeetupAiError {
    /// A required API credential is not configured
    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    /// The geocoder returned no results for the given query
    #[error("Could not find location '{0}'")]
    LocationNotFound(String),

    /// The venue API answered with a non-OK status field
    #[error("Venue search failed with upstream status '{status}'")]
    Upstream { status: String },

    /// Network-level failure talking to an external service
    #[error("Network error: {0}")]
    Transport(String),

    /// An outbound call exceeded its deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The text-generation backend failed or returned garbage
    #[error("Completion backend error: {0}")]
    Backend(String),

    /// Input validation errors
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl MeetupAiError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new backend error
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend(message.into())
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MeetupAiError::MissingCredential(name) => {
                format!("{name} is not set. Please configure it in your environment or .env file.")
            }
            MeetupAiError::LocationNotFound(query) => {
                format!("Could not find location '{query}'. Try a more specific place name.")
            }
            MeetupAiError::Upstream { status } => {
                format!("The venue search service reported '{status}'. Please try again later.")
            }
            MeetupAiError::Transport(_) => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            MeetupAiError::Timeout(_) => {
                "An external service took too long to respond. Please try again.".to_string()
            }
            MeetupAiError::Backend(_) => {
                "The recommendation service failed to produce a result. Please try again."
                    .to_string()
            }
            MeetupAiError::Validation(message) => format!("Invalid input: {message}"),
            MeetupAiError::Config(_) => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            MeetupAiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for MeetupAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MeetupAiError::Timeout(err.to_string())
        } else {
            MeetupAiError::Transport(err.to_string())
        }
    }
}
