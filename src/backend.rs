//! Text-generation backend
//!
//! The pipeline stages talk to an external completion service through the
//! `CompletionBackend` trait; the shipped implementation targets any
//! OpenAI-compatible chat-completions API. The service is treated as a
//! black box: one request per stage, bounded timeout, no retries.

use crate::agents::RoleProfile;
use crate::config::BackendConfig;
use crate::tasks::TaskSpec;
use crate::{MeetupAiError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// An external text-generation service invoked with a role, a task, and
/// optional upstream context
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one completion for the given role and task
    async fn complete(
        &self,
        profile: &RoleProfile,
        task: &TaskSpec,
        context: Option<&str>,
    ) -> Result<String>;
}

/// Completion backend for OpenAI-compatible chat APIs
pub struct OpenAiBackend {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiBackend {
    /// Create a new backend from configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("MeetupAI/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MeetupAiError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Compose the user message: task description, upstream context, and
    /// the expected output shape
    pub(crate) fn compose_user_message(task: &TaskSpec, context: Option<&str>) -> String {
        let mut message = task.description.clone();

        if let Some(context) = context {
            message.push_str("\n\nContext from the previous task:\n");
            message.push_str(context);
        }

        message.push_str("\n\nExpected output:\n");
        message.push_str(&task.expected_output);
        message
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    #[instrument(skip(self, task, context), fields(role = profile.name))]
    async fn complete(
        &self,
        profile: &RoleProfile,
        task: &TaskSpec,
        context: Option<&str>,
    ) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(MeetupAiError::MissingCredential("OPENAI_API_KEY"))?;

        info!("Invoking completion backend for role '{}'", profile.name);

        let request = wire::ChatRequest {
            model: &self.model,
            messages: vec![
                wire::ChatMessage {
                    role: "system",
                    content: profile.system_prompt(),
                },
                wire::ChatMessage {
                    role: "user",
                    content: Self::compose_user_message(task, context),
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MeetupAiError::backend(format!(
                "completion request failed with {status}: {body}"
            )));
        }

        let body: wire::ChatResponse = response
            .json()
            .await
            .map_err(|e| MeetupAiError::backend(format!("invalid completion response: {e}")))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| MeetupAiError::backend("completion response contained no text"))?;

        debug!(
            "Backend returned {} characters for role '{}'",
            content.len(),
            profile.name
        );

        Ok(content)
    }
}

/// Chat-completions wire format
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub(super) struct ChatRequest<'a> {
        pub model: &'a str,
        pub messages: Vec<ChatMessage<'a>>,
    }

    #[derive(Debug, Serialize)]
    pub(super) struct ChatMessage<'a> {
        pub role: &'a str,
        pub content: String,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct ChatResponse {
        #[serde(default)]
        pub choices: Vec<Choice>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct Choice {
        pub message: AssistantMessage,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct AssistantMessage {
        pub content: Option<String>,
    }
}
