/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which packages a
 * document with the marker instruction, sends it to the injected provider
 * exactly once and returns the normalized document.
 */

use log::{debug, info};
use std::time::{Duration, Instant};

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest, TranslationResponse};
use super::normalizer::normalize_response;
use super::prompts::build_instruction;

/// Token usage statistics for tracking API consumption
#[derive(Clone, Debug)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Time spent waiting on the provider
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,
}

impl TokenUsageStats {
    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: impl Into<String>) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            api_duration: Duration::from_secs(0),
            provider: provider.into(),
        }
    }

    /// Add token usage numbers
    pub fn add_token_usage(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>) {
        if let Some(pt) = prompt_tokens {
            self.prompt_tokens += pt;
            self.total_tokens += pt;
        }

        if let Some(ct) = completion_tokens {
            self.completion_tokens += ct;
            self.total_tokens += ct;
        }
    }

    /// Add API request duration
    pub fn add_request_duration(&mut self, duration: Duration) {
        self.api_duration += duration;
    }

    /// Calculate tokens per minute rate
    pub fn tokens_per_minute(&self) -> f64 {
        let duration_minutes = self.api_duration.as_secs_f64() / 60.0;
        if duration_minutes > 0.0 {
            self.total_tokens as f64 / duration_minutes
        } else {
            0.0
        }
    }

    /// Generate a one-line summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "{} token usage: {} total ({} prompt, {} completion) in {:.1}s of API time at {:.0} tokens/min",
            self.provider,
            self.total_tokens,
            self.prompt_tokens,
            self.completion_tokens,
            self.api_duration.as_secs_f64(),
            self.tokens_per_minute()
        )
    }
}

/// Sends the document to the translation capability
#[derive(Debug)]
pub struct TranslationService<'a> {
    /// Injected capability
    provider: &'a dyn Provider,

    /// Instruction sent with every request
    instruction: String,

    /// Usage accumulated over this service's lifetime
    token_usage: TokenUsageStats,
}

impl<'a> TranslationService<'a> {
    /// Create a service using the built-in marker instruction
    pub fn new(provider: &'a dyn Provider) -> Self {
        Self::with_instruction(provider, build_instruction())
    }

    /// Create a service with a custom instruction
    pub fn with_instruction(provider: &'a dyn Provider, instruction: impl Into<String>) -> Self {
        Self {
            provider,
            instruction: instruction.into(),
            token_usage: TokenUsageStats::with_provider_info(provider.name()),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn token_usage(&self) -> &TokenUsageStats {
        &self.token_usage
    }

    /// Issue a single request and return the provider's raw answer
    pub async fn request(&mut self, document: &str) -> Result<TranslationResponse, ProviderError> {
        let request = TranslationRequest::new(self.instruction.clone(), document);

        debug!(
            "Requesting translation from {} ({} chars of instruction, {} chars of content)",
            self.provider.name(),
            request.instruction.len(),
            request.content.len()
        );

        let started = Instant::now();
        let response = self.provider.complete(request).await?;

        self.token_usage.add_request_duration(started.elapsed());
        self.token_usage.add_token_usage(response.prompt_tokens, response.completion_tokens);
        if self.token_usage.total_tokens > 0 {
            info!("{}", self.token_usage.summary());
        }

        Ok(response)
    }

    /// Request a translation and normalize the answer into the new document
    pub async fn translate_document(&mut self, document: &str) -> Result<String, ProviderError> {
        let response = self.request(document).await?;
        let normalized = normalize_response(&response.text);

        if normalized.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(normalized)
    }
}
