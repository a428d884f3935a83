//! Model client configuration.

use folio_error::{ModelsError, ModelsErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Wire protocol family spoken by a model endpoint.
///
/// Parsed case-insensitively from the labels users type in configuration,
/// including the Chinese provider names.
///
/// # Examples
///
/// ```
/// use folio_core::InterfaceFormat;
///
/// assert_eq!("openai".parse::<InterfaceFormat>().unwrap(), InterfaceFormat::OpenAI);
/// assert_eq!("Azure OpenAI".parse::<InterfaceFormat>().unwrap(), InterfaceFormat::AzureOpenAI);
/// assert_eq!("火山引擎".parse::<InterfaceFormat>().unwrap(), InterfaceFormat::VolcanoEngine);
/// assert!("carrier pigeon".parse::<InterfaceFormat>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub enum InterfaceFormat {
    /// OpenAI chat completions
    #[default]
    #[display("OpenAI")]
    OpenAI,
    /// DeepSeek (OpenAI-compatible)
    #[display("DeepSeek")]
    DeepSeek,
    /// Local Ollama server (OpenAI-compatible)
    #[display("Ollama")]
    Ollama,
    /// LM Studio local server (OpenAI-compatible)
    #[display("LM Studio")]
    LmStudio,
    /// Azure OpenAI deployment
    #[display("Azure OpenAI")]
    AzureOpenAI,
    /// Azure AI inference endpoint
    #[display("Azure AI")]
    AzureAI,
    /// Google Gemini
    #[display("Gemini")]
    Gemini,
    /// Aliyun Bailian (OpenAI-compatible)
    #[display("Aliyun Bailian")]
    AliyunBailian,
    /// Volcano Engine Ark (OpenAI-compatible, system prompt required)
    #[display("Volcano Engine")]
    VolcanoEngine,
}

impl InterfaceFormat {
    /// Whether requests go through the OpenAI-compatible chat completions shape.
    pub fn is_openai_compatible(&self) -> bool {
        !matches!(
            self,
            InterfaceFormat::AzureOpenAI | InterfaceFormat::AzureAI | InterfaceFormat::Gemini
        )
    }
}

impl FromStr for InterfaceFormat {
    type Err = ModelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        let format = match normalized.as_str() {
            "openai" => InterfaceFormat::OpenAI,
            "deepseek" => InterfaceFormat::DeepSeek,
            "ollama" => InterfaceFormat::Ollama,
            "ml studio" | "lm studio" | "lmstudio" => InterfaceFormat::LmStudio,
            "azure openai" => InterfaceFormat::AzureOpenAI,
            "azure ai" => InterfaceFormat::AzureAI,
            "gemini" => InterfaceFormat::Gemini,
            "阿里云百炼" | "aliyun bailian" | "bailian" => InterfaceFormat::AliyunBailian,
            "火山引擎" | "volcano engine" | "volcengine" => InterfaceFormat::VolcanoEngine,
            _ => {
                return Err(ModelsError::new(ModelsErrorKind::UnknownInterfaceFormat(
                    s.to_string(),
                )));
            }
        };
        Ok(format)
    }
}

impl TryFrom<String> for InterfaceFormat {
    type Error = ModelsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InterfaceFormat> for String {
    fn from(format: InterfaceFormat) -> Self {
        format.to_string()
    }
}

/// Everything needed to reach one model endpoint.
///
/// # Examples
///
/// ```
/// use folio_core::{InterfaceFormat, ModelConfig};
///
/// let config = ModelConfig::builder()
///     .interface_format(InterfaceFormat::DeepSeek)
///     .base_url("https://api.deepseek.com")
///     .model_name("deepseek-chat")
///     .api_key("sk-test")
///     .build()
///     .unwrap();
///
/// assert_eq!(*config.temperature(), 0.3);
/// assert_eq!(*config.max_tokens(), 2048);
/// assert_eq!(config.timeout().as_secs(), 600);
/// ```
#[derive(
    Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder, derive_getters::Getters,
)]
#[builder(setter(into), default)]
pub struct ModelConfig {
    /// Protocol family of the endpoint
    #[serde(default)]
    interface_format: InterfaceFormat,
    /// Endpoint base URL
    #[serde(default = "default_base_url")]
    base_url: String,
    /// Credential sent with every request
    #[serde(default)]
    api_key: String,
    /// Model or deployment identifier
    #[serde(default = "default_model_name")]
    model_name: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,
    /// Maximum output tokens
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    /// Retries for transient failures (0 disables retrying)
    #[serde(default = "default_max_retries")]
    max_retries: usize,
    /// Move `<think>` blocks out of the answer text
    #[serde(default = "default_strip_reasoning")]
    strip_reasoning: bool,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model_name() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_max_retries() -> usize {
    3
}

fn default_strip_reasoning() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            interface_format: InterfaceFormat::default(),
            base_url: default_base_url(),
            api_key: String::new(),
            model_name: default_model_name(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            strip_reasoning: default_strip_reasoning(),
        }
    }
}

impl ModelConfig {
    /// Creates a new config builder.
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Replace the credential, keeping everything else.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("interface_format", &self.interface_format)
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("model_name", &self.model_name)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("strip_reasoning", &self.strip_reasoning)
            .finish()
    }
}
