//! Document extraction backends.
//!
//! The service talks to the model through [`DocumentExtractor`] so the Gemini
//! client can be swapped for [`mock::MockExtractor`] in tests.

pub mod gemini;
pub mod mock;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
///
/// The kinds are kept for logs and metrics; callers of the HTTP API only ever
/// see a generic processing error.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Credential rejected: {0}")]
    Unauthorized(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Short stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::NetworkError(_) => "network",
            ProviderError::Unauthorized(_) => "unauthorized",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ApiError(_) => "api",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Turns a document into a clinical narrative.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Send the document to the model once and return its trimmed reply.
    async fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<String, ProviderError>;
}
