/*!
 * Translation of marked documents using AI providers.
 *
 * - `core`: The single-request translation service
 * - `prompts`: Instruction template for marker replacement
 * - `normalizer`: Boundary fence stripping for provider answers
 */

// Re-export main types for easier usage
pub use self::core::{TokenUsageStats, TranslationService};
pub use self::normalizer::normalize_response;
pub use self::prompts::PromptTemplate;

// Submodules
pub mod core;
pub mod normalizer;
pub mod prompts;
