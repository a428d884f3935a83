//! OpenAI-compatible chat completions client.
//!
//! Serves OpenAI, DeepSeek, Ollama, LM Studio, Aliyun Bailian and Volcano
//! Engine. The wire types are shared with the Azure clients, which speak
//! the same body shape behind different URLs and auth headers.

use crate::http::{build_client, send_json};
use crate::{normalize_base_url, split_reasoning, with_retry};
use async_trait::async_trait;
use folio_core::{
    GenerateRequest, GenerateResponse, InterfaceFormat, Message, ModelConfig, Output, Role,
};
use folio_error::{FolioResult, ModelsError, ModelsErrorKind, ModelsResult};
use folio_interface::FolioDriver;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// System message Volcano Engine endpoints expect ahead of the user turn.
pub const VOLCANO_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

/// Credential placeholder Ollama accepts when none is configured.
const OLLAMA_PLACEHOLDER_KEY: &str = "ollama";

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    role: Role,
    content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: *message.role(),
            content: message.content().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

impl ChatCompletionRequest {
    /// Merge per-request overrides over configured defaults.
    pub(crate) fn new(
        req: &GenerateRequest,
        config: &ModelConfig,
        model: Option<String>,
        system_prompt: Option<&str>,
    ) -> Self {
        let mut messages = Vec::with_capacity(req.messages().len() + 1);
        let has_system = req.messages().iter().any(|m| *m.role() == Role::System);
        if let (Some(prompt), false) = (system_prompt, has_system) {
            messages.push(ChatMessage {
                role: Role::System,
                content: prompt.to_string(),
            });
        }
        messages.extend(req.messages().iter().map(ChatMessage::from));

        Self {
            model,
            messages,
            max_tokens: req.max_tokens().unwrap_or(*config.max_tokens()),
            temperature: req.temperature().unwrap_or(*config.temperature()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    /// DeepSeek reasoner and some Bailian models return thoughts separately.
    #[serde(default)]
    reasoning_content: Option<String>,
}

impl ChatCompletionResponse {
    /// Convert the first choice into outputs.
    pub(crate) fn into_response(self, strip_reasoning: bool) -> ModelsResult<GenerateResponse> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            ModelsError::new(ModelsErrorKind::ResponseParse(
                "response contained no choices".to_string(),
            ))
        })?;

        let mut outputs = Vec::new();
        if let Some(reasoning) = choice
            .message
            .reasoning_content
            .filter(|r| !r.trim().is_empty())
        {
            outputs.push(Output::Reasoning(reasoning));
        }
        outputs.extend(split_reasoning(
            choice.message.content.as_deref().unwrap_or_default(),
            strip_reasoning,
        ));

        GenerateResponse::builder()
            .outputs(outputs)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))
    }
}

/// Client for any endpoint implementing `POST {base}/chat/completions`.
///
/// # Examples
///
/// ```
/// use folio_core::{InterfaceFormat, ModelConfig};
/// use folio_interface::FolioDriver;
/// use folio_models::OpenAICompatibleClient;
///
/// let config = ModelConfig::builder()
///     .interface_format(InterfaceFormat::Ollama)
///     .base_url("http://localhost:11434")
///     .model_name("qwen2.5")
///     .build()
///     .unwrap();
///
/// let client = OpenAICompatibleClient::new(&config).unwrap();
/// assert_eq!(client.endpoint(), "http://localhost:11434/v1/chat/completions");
/// assert_eq!(client.provider_name(), "ollama");
/// ```
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    config: ModelConfig,
    endpoint: String,
    api_key: String,
    provider: &'static str,
    system_prompt: Option<&'static str>,
}

impl OpenAICompatibleClient {
    /// Create a client for one of the OpenAI-compatible interface formats.
    pub fn new(config: &ModelConfig) -> ModelsResult<Self> {
        let format = *config.interface_format();
        if !format.is_openai_compatible() {
            return Err(ModelsError::new(ModelsErrorKind::InvalidEndpoint(format!(
                "{} does not speak the OpenAI chat completions protocol",
                format
            ))));
        }

        // Volcano Engine takes the base URL as given.
        let base = if format == InterfaceFormat::VolcanoEngine {
            config.base_url().trim().trim_end_matches('/').to_string()
        } else {
            normalize_base_url(config.base_url())
        };
        if base.is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::InvalidEndpoint(
                "base_url is empty".to_string(),
            )));
        }

        let api_key = match (format, config.api_key().is_empty()) {
            (InterfaceFormat::Ollama, true) => OLLAMA_PLACEHOLDER_KEY.to_string(),
            _ => config.api_key().clone(),
        };

        let system_prompt = match format {
            InterfaceFormat::VolcanoEngine => Some(VOLCANO_SYSTEM_PROMPT),
            _ => None,
        };

        debug!(format = %format, base = %base, model = %config.model_name(), "Creating OpenAI-compatible client");

        Ok(Self {
            client: build_client(config)?,
            config: config.clone(),
            endpoint: format!("{}/chat/completions", base.trim_end_matches('/')),
            api_key,
            provider: provider_label(format),
            system_prompt,
        })
    }

    /// Full chat completions URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, body), fields(provider = self.provider, model = %self.config.model_name()))]
    async fn send_once(&self, body: &ChatCompletionRequest) -> ModelsResult<GenerateResponse> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        let response: ChatCompletionResponse = send_json(self.provider, request).await?;
        response.into_response(*self.config.strip_reasoning())
    }
}

fn provider_label(format: InterfaceFormat) -> &'static str {
    match format {
        InterfaceFormat::OpenAI => "openai",
        InterfaceFormat::DeepSeek => "deepseek",
        InterfaceFormat::Ollama => "ollama",
        InterfaceFormat::LmStudio => "lmstudio",
        InterfaceFormat::AzureOpenAI => "azure-openai",
        InterfaceFormat::AzureAI => "azure-ai",
        InterfaceFormat::Gemini => "gemini",
        InterfaceFormat::AliyunBailian => "bailian",
        InterfaceFormat::VolcanoEngine => "volcengine",
    }
}

#[async_trait]
impl FolioDriver for OpenAICompatibleClient {
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        let model = req
            .model()
            .clone()
            .unwrap_or_else(|| self.config.model_name().clone());
        let body = ChatCompletionRequest::new(req, &self.config, Some(model), self.system_prompt);

        let response = with_retry(self.provider, *self.config.max_retries(), || {
            self.send_once(&body)
        })
        .await?;
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        self.config.model_name()
    }
}
