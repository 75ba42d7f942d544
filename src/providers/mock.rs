/*!
 * Mock provider implementations for testing.
 *
 * This module provides a scripted provider that simulates different behaviors:
 * - `MockProvider::translating(..)` - Replaces every marker with a fixed translation
 * - `MockProvider::fenced(..)` - Same, wrapped in a fenced block
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Answers with no text
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::markers::TRANSLATION_MARKER;
use crate::providers::{Provider, TranslationRequest, TranslationResponse};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns the document unchanged
    Echo,
    /// Replaces each marker with the given text
    Translating { translation: String },
    /// Like `Translating`, wrapped in a fence with an optional language tag
    Fenced { translation: String, language_tag: String },
    /// Always fails with an error
    Failing,
    /// Returns empty response
    Empty,
    /// Simulates slow response before translating
    Slow { delay_ms: u64, translation: String },
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of `complete` calls, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Most recent request, shared between clones
    last_request: Arc<Mutex<Option<TranslationRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&TranslationRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            custom_response: None,
        }
    }

    /// Create a mock that returns the document untouched
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock that substitutes every marker with `translation`
    pub fn translating(translation: impl Into<String>) -> Self {
        Self::new(MockBehavior::Translating { translation: translation.into() })
    }

    /// Create a mock whose answer is wrapped in a fenced block
    pub fn fenced(translation: impl Into<String>, language_tag: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fenced {
            translation: translation.into(),
            language_tag: language_tag.into(),
        })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that waits before answering
    pub fn slow(delay_ms: u64, translation: impl Into<String>) -> Self {
        Self::new(MockBehavior::Slow { delay_ms, translation: translation.into() })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&TranslationRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// The last request received, if any
    pub fn last_request(&self) -> Option<TranslationRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }

    fn substitute(content: &str, translation: &str) -> String {
        content.replace(TRANSLATION_MARKER, translation)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn complete(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if let Some(generator) = self.custom_response {
            return Ok(TranslationResponse::from_text(generator(&request)));
        }

        let text = match &self.behavior {
            MockBehavior::Echo => request.content.clone(),
            MockBehavior::Translating { translation } => Self::substitute(&request.content, translation),
            MockBehavior::Fenced { translation, language_tag } => format!(
                "```{}\n{}\n```",
                language_tag,
                Self::substitute(&request.content, translation)
            ),
            MockBehavior::Failing => {
                return Err(ProviderError::ApiError {
                    message: "Simulated provider failure".to_string(),
                    status_code: 500,
                });
            }
            MockBehavior::Empty => String::new(),
            MockBehavior::Slow { delay_ms, translation } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Self::substitute(&request.content, translation)
            }
        };

        Ok(TranslationResponse {
            prompt_tokens: Some((request.instruction.len() + request.content.len()) as u64),
            completion_tokens: Some(text.len() as u64),
            text,
        })
    }
}
