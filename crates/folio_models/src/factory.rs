//! Driver construction from configuration.

use crate::{AzureAIClient, AzureOpenAIClient, GeminiClient, OpenAICompatibleClient};
use folio_core::{InterfaceFormat, ModelConfig};
use folio_error::FolioResult;
use folio_interface::FolioDriver;
use tracing::info;

/// Build the driver matching `config.interface_format`.
///
/// # Errors
///
/// Fails when the base URL does not have the shape the format requires
/// (Azure URLs in particular) or the HTTP client cannot be built.
///
/// # Examples
///
/// ```
/// use folio_core::{InterfaceFormat, ModelConfig};
/// use folio_interface::FolioDriver;
/// use folio_models::create_driver;
///
/// let config = ModelConfig::builder()
///     .interface_format(InterfaceFormat::DeepSeek)
///     .base_url("https://api.deepseek.com")
///     .model_name("deepseek-chat")
///     .build()
///     .unwrap();
///
/// let driver = create_driver(&config).unwrap();
/// assert_eq!(driver.provider_name(), "deepseek");
/// assert_eq!(driver.model_name(), "deepseek-chat");
/// ```
pub fn create_driver(config: &ModelConfig) -> FolioResult<Box<dyn FolioDriver>> {
    let format = *config.interface_format();
    info!(format = %format, model = %config.model_name(), "Creating model driver");

    let driver: Box<dyn FolioDriver> = match format {
        InterfaceFormat::AzureOpenAI => Box::new(AzureOpenAIClient::new(config)?),
        InterfaceFormat::AzureAI => Box::new(AzureAIClient::new(config)?),
        InterfaceFormat::Gemini => Box::new(GeminiClient::new(config)?),
        InterfaceFormat::OpenAI
        | InterfaceFormat::DeepSeek
        | InterfaceFormat::Ollama
        | InterfaceFormat::LmStudio
        | InterfaceFormat::AliyunBailian
        | InterfaceFormat::VolcanoEngine => Box::new(OpenAICompatibleClient::new(config)?),
    };
    Ok(driver)
}
