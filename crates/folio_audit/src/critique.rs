//! Model-backed chapter critique.

use folio_error::{AuditError, AuditErrorKind, FolioResult};
use folio_interface::FolioDriver;
use tracing::{debug, instrument, warn};

/// Sends the critique prompt to a model and insists on an answer.
#[derive(Debug, Clone)]
pub struct CritiqueInvoker<D> {
    driver: D,
}

impl<D: FolioDriver> CritiqueInvoker<D> {
    /// Wrap a driver.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Ask the model to critique `prompt`.
    ///
    /// # Errors
    ///
    /// [`AuditErrorKind::EmptyCritiqueResponse`] when the model answers with
    /// nothing but whitespace; model transport errors pass through.
    #[instrument(skip(self, prompt), fields(provider = self.driver.provider_name(), model = self.driver.model_name(), prompt_len = prompt.len()))]
    pub async fn critique(&self, prompt: &str) -> FolioResult<String> {
        debug!(prompt = %prompt, "Critique prompt");
        let response = self.driver.invoke(prompt).await?;

        if response.trim().is_empty() {
            warn!("Reviewer returned an empty critique");
            return Err(AuditError::new(AuditErrorKind::EmptyCritiqueResponse).into());
        }

        debug!(response = %response, "Critique response");
        Ok(response)
    }
}
