/*!
 * Provider implementations for the external translation capability.
 *
 * Every provider accepts an instruction plus the verbatim document and
 * answers with a single block of text:
 * - OpenAI: OpenAI chat completions (also used for LM Studio)
 * - Anthropic: Anthropic messages API
 * - Ollama: Local LLM server
 * - Mock: Scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

pub mod anthropic;
pub mod mock;
pub mod ollama;
pub mod openai;

/// A request for the translation capability
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Fixed instruction describing the marker replacement task
    pub instruction: String,
    /// The document text, passed through verbatim
    pub content: String,
}

impl TranslationRequest {
    pub fn new(instruction: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            content: content.into(),
        }
    }
}

/// The capability's raw answer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationResponse {
    /// Full response text, before any normalization
    pub text: String,
    /// Prompt tokens, when the provider reports them
    pub prompt_tokens: Option<u64>,
    /// Completion tokens, when the provider reports them
    pub completion_tokens: Option<u64>,
}

impl TranslationResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Common trait for all translation providers
///
/// The pipeline only depends on this contract, so any implementation can be
/// injected, including scripted ones in tests.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name for log output
    fn name(&self) -> &str;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The instruction and document to send
    ///
    /// # Returns
    /// * `Result<TranslationResponse, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError>;
}

/// Build the provider selected by the configuration
pub fn create_provider(config: &TranslationConfig) -> Box<dyn Provider> {
    let model = config.get_model();
    let endpoint = config.get_endpoint();
    let api_key = config.get_api_key();
    let timeout = Duration::from_secs(config.get_timeout_secs());
    let temperature = config.common.temperature;

    match config.provider {
        TranslationProvider::OpenAI | TranslationProvider::LMStudio => Box::new(
            openai::OpenAI::new(api_key, endpoint, model, timeout)
                .with_temperature(temperature)
                .with_max_tokens(config.common.max_tokens)
                .with_name(config.provider.display_name()),
        ),
        TranslationProvider::Anthropic => Box::new(
            anthropic::Anthropic::new(api_key, endpoint, model, timeout)
                .with_temperature(temperature)
                .with_max_tokens(config.common.max_tokens),
        ),
        TranslationProvider::Ollama => Box::new(
            ollama::Ollama::new(endpoint, model, timeout).with_temperature(temperature),
        ),
    }
}

/// Build an HTTP client, falling back to the default client if the builder fails
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Read the body of a failed response and classify it
pub(crate) async fn status_error(provider: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let error_text = response.text().await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    log::error!("{} API error ({}): {}", provider, status, error_text);
    ProviderError::from_status(status.as_u16(), error_text)
}
