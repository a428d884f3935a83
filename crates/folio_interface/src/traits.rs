//! Trait definitions for model backends.

use async_trait::async_trait;
use folio_core::{GenerateRequest, GenerateResponse};
use folio_error::FolioResult;
use std::sync::Arc;

/// Core trait that all model backends must implement.
#[async_trait]
pub trait FolioDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse>;

    /// Provider name (e.g., "openai", "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "deepseek-chat").
    fn model_name(&self) -> &str;

    /// Send a single prompt and return the answer text.
    ///
    /// An empty string means the model produced nothing usable; callers
    /// decide what that means for them.
    async fn invoke(&self, prompt: &str) -> FolioResult<String> {
        tracing::debug!(
            provider = self.provider_name(),
            model = self.model_name(),
            prompt_len = prompt.len(),
            "Invoking model"
        );
        let request = GenerateRequest::from_prompt(prompt);
        let response = self.generate(&request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            tracing::warn!("Model returned no text");
        }
        Ok(text)
    }
}

#[async_trait]
impl<D: FolioDriver + ?Sized> FolioDriver for Box<D> {
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    async fn invoke(&self, prompt: &str) -> FolioResult<String> {
        (**self).invoke(prompt).await
    }
}

#[async_trait]
impl<D: FolioDriver + ?Sized> FolioDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    async fn invoke(&self, prompt: &str) -> FolioResult<String> {
        (**self).invoke(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Output;

    struct CannedDriver(Vec<Output>);

    #[async_trait]
    impl FolioDriver for CannedDriver {
        async fn generate(&self, _req: &GenerateRequest) -> FolioResult<GenerateResponse> {
            Ok(GenerateResponse::builder()
                .outputs(self.0.clone())
                .build()
                .expect("valid response"))
        }

        fn provider_name(&self) -> &'static str {
            "canned"
        }

        fn model_name(&self) -> &str {
            "canned-1"
        }
    }

    #[tokio::test]
    async fn test_invoke_returns_answer_text_only() {
        let driver = CannedDriver(vec![
            Output::Reasoning("thinking".to_string()),
            Output::Text("All consistent.".to_string()),
        ]);
        assert_eq!(driver.invoke("prompt").await.unwrap(), "All consistent.");
    }

    #[tokio::test]
    async fn test_boxed_driver_delegates() {
        let driver: Box<dyn FolioDriver> = Box::new(CannedDriver(vec![]));
        assert_eq!(driver.invoke("prompt").await.unwrap(), "");
        assert_eq!(driver.provider_name(), "canned");
    }
}
