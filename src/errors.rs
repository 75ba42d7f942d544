/*!
 * Error types for the doclocalizer application.
 *
 * This module contains custom error types for the translation capability
 * and for the localization pipeline, using the thiserror crate for
 * ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The provider answered but the answer carried no document
    #[error("Empty response received from translation service")]
    EmptyResponse,
}

impl ProviderError {
    /// Classify a non-success HTTP status into the matching variant
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that terminate a localization run
#[derive(Error, Debug)]
pub enum LocalizeError {
    /// No document path was supplied
    #[error("Usage: {0}")]
    Usage(String),

    /// The document path does not resolve to a file
    #[error("Error: File '{}' not found", path.display())]
    NotFound {
        /// Path as given by the caller
        path: PathBuf,
    },

    /// The document exists but could not be read as text
    #[error("Failed to read file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The localized document could not be written back
    #[error("Failed to write file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external translation capability failed
    #[error("Translation service error: {0}")]
    TranslationService(#[from] ProviderError),
}

impl LocalizeError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<anyhow::Error> for LocalizeError {
    fn from(error: anyhow::Error) -> Self {
        Self::Config(format!("{:#}", error))
    }
}
