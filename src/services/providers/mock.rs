//! Mock provider implementation for testing.

use super::{FinishReason, ProviderError, ProviderResponse, VisionProvider};
use crate::models::ChartImage;
use async_trait::async_trait;

/// Mock vision provider that returns a canned reply.
pub struct MockVisionProvider {
    reply: Option<String>,
}

impl MockVisionProvider {
    /// Provider that replies with the given text.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// Provider that fails every call as unconfigured.
    pub fn disabled() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    async fn analyze_chart(
        &self,
        prompt: &str,
        _image: &ChartImage,
    ) -> Result<ProviderResponse, ProviderError> {
        let Some(reply) = &self.reply else {
            return Err(ProviderError::NotConfigured(
                "Mock vision provider not enabled".to_string(),
            ));
        };

        Ok(ProviderResponse {
            text: Some(reply.clone()),
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: reply.len() as i32 / 4,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.reply.is_some() {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock vision provider not enabled".to_string(),
            ))
        }
    }
}
