//! Vision provider abstraction.
//!
//! A trait seam over the generative vision backend so the HTTP layer can be
//! exercised against a mock in tests while production talks to Gemini.

pub mod gemini;
pub mod mock;

use crate::models::ChartImage;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider call.
pub struct ProviderResponse {
    /// Raw reply text (JSON is requested but never guaranteed).
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Trait for image+text generation providers (e.g., Gemini vision).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Send a prompt plus one inline chart image and return the reply.
    async fn analyze_chart(
        &self,
        prompt: &str,
        image: &ChartImage,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
