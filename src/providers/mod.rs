mod anthropic;
mod factory;
mod google;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_mood_prompt, build_style_prompt, PromptRequest, RESPONSE_FORMAT};

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use crate::MoodflixError;

/// Unified trait for all generative model providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send a prompt (text, or text plus image) and return the raw answer text.
    ///
    /// `Ok(None)` means the provider answered but produced no text.
    async fn generate(&self, request: &PromptRequest) -> Result<Option<String>, MoodflixError>;
}

pub(crate) fn http_client(timeout: Option<Duration>) -> Result<Client, MoodflixError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| MoodflixError::Builder(format!("Failed to create HTTP client: {}", e)))
}

/// Read a provider response body, turning transport failures and non-success
/// statuses into `AiCall` errors.
pub(crate) async fn read_response(
    provider: &str,
    response: Result<Response, reqwest::Error>,
) -> Result<Value, MoodflixError> {
    let response =
        response.map_err(|e| MoodflixError::AiCall(format!("{} request failed: {}", provider, e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(MoodflixError::AiCall(format!(
            "{} API error ({}): {}",
            provider, status, error_text
        )));
    }

    let body: Value = response.json().await.map_err(|e| {
        MoodflixError::AiCall(format!("{} returned an unreadable body: {}", provider, e))
    })?;
    debug!("{} response: {:?}", provider, body);
    Ok(body)
}

/// Join the `text` fields of a list of content parts. `None` when no part has text.
pub(crate) fn collect_text(parts: &Value) -> Option<String> {
    let texts: Vec<&str> = parts
        .as_array()?
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}
