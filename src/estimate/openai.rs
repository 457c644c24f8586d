//! OpenAI-compatible HTTP implementation of the hours estimator.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::changes::ChangeSet;

use super::EstimationService;
use super::error::EstimationError;
use super::hours::{Hours, parse_hours};
use super::prompt::{SYSTEM_PROMPT, build_prompt};

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 50;

/// Configuration for [`OpenAiEstimationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiEstimationConfig {
    /// Base API URL (e.g., `https://api.openai.com/v1`).
    pub base_url: String,
    /// Model identifier sent in chat-completions requests.
    pub model: String,
    /// API key used for bearer authentication.
    pub api_key: Option<String>,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl Default for OpenAiEstimationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OpenAiEstimationConfig {
    /// Constructs configuration with required API settings.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            timeout,
        }
    }
}

/// OpenAI-compatible estimation service.
///
/// Sends exactly one chat-completions request per estimate; failures are
/// returned to the caller without retrying.
#[derive(Debug, Clone, Default)]
pub struct OpenAiEstimationService {
    config: OpenAiEstimationConfig,
}

impl OpenAiEstimationService {
    /// Creates a service from explicit configuration.
    #[must_use]
    pub const fn new(config: OpenAiEstimationConfig) -> Self {
        Self { config }
    }

    fn extract_api_key(&self) -> Result<&str, EstimationError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(EstimationError::MissingApiKey)
    }

    fn create_http_client(&self) -> Result<Client, EstimationError> {
        Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|error| EstimationError::Client {
                message: error.to_string(),
            })
    }
}

impl EstimationService for OpenAiEstimationService {
    fn estimate(&self, changes: &ChangeSet) -> Result<Hours, EstimationError> {
        let api_key = self.extract_api_key()?;
        let endpoint = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = ChatCompletionsRequest {
            model: self.config.model.as_str(),
            messages: vec![
                ChatCompletionsMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_owned(),
                },
                ChatCompletionsMessage {
                    role: "user",
                    content: build_prompt(changes),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let client = self.create_http_client()?;
        let response = client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .map_err(|error| EstimationError::Transport {
                message: error.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), 160),
            );
            return Err(EstimationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_payload: ChatCompletionsResponse =
            response.json().map_err(|error| EstimationError::Decode {
                message: error.to_string(),
            })?;

        let content = response_payload
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .and_then(parse_content_value)
            .unwrap_or_default();

        tracing::debug!(response = content, "received estimate from AI service");

        parse_hours(content).ok_or_else(|| EstimationError::NoEstimate {
            response: truncate_for_message(content, 80),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionsMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatContentPart>),
}

#[derive(Debug, Deserialize)]
struct ChatContentPart {
    text: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<ChatContent>,
}

fn parse_content_value(content: &ChatContent) -> Option<&str> {
    match content {
        ChatContent::Text(text) => Some(text.as_str()),
        ChatContent::Parts(parts) => parts
            .iter()
            .find_map(|part| part.text.as_deref().or(part.content.as_deref())),
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod tests;
