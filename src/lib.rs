/*!
 * # doclocalizer
 *
 * A Rust library for filling translation placeholders in text documents
 * using AI.
 *
 * A document carries literal markers right after source-language passages.
 * The whole document is sent once to a translation provider together with an
 * instruction to replace every marker with a translation of the text before
 * it. The answer is cleaned of boundary code fences and written back over
 * the original file.
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `app_controller`: Load, scan, request, normalize and write pipeline
 * - `file_utils`: Document loading and writing
 * - `markers`: Literal marker scanning
 * - `translation`: Instruction, request and response normalization
 * - `providers`: Client implementations for LLM providers:
 *   - `providers::openai`: OpenAI (and LM Studio) chat completions
 *   - `providers::anthropic`: Anthropic messages API
 *   - `providers::ollama`: Ollama chat API
 *   - `providers::mock`: Scripted provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod markers;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOutcome};
pub use errors::{LocalizeError, ProviderError};
pub use markers::{MarkerScan, TRANSLATION_MARKER};
pub use providers::{Provider, TranslationRequest, TranslationResponse};
pub use translation::{normalize_response, TranslationService};
