//! Azure-hosted chat completion clients.
//!
//! Both Azure flavours accept the OpenAI body shape but authenticate with an
//! `api-key` header and encode routing in the URL, so the configured base
//! URL is parsed rather than normalised.

use crate::http::{build_client, send_json};
use crate::openai_compat::{ChatCompletionRequest, ChatCompletionResponse};
use crate::with_retry;
use async_trait::async_trait;
use folio_core::{GenerateRequest, GenerateResponse, ModelConfig};
use folio_error::{FolioResult, ModelsError, ModelsErrorKind, ModelsResult};
use folio_interface::FolioDriver;
use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;
use tracing::debug;

/// API version used when an Azure AI URL does not name one.
pub const AZURE_AI_DEFAULT_API_VERSION: &str = "2024-05-01-preview";

/// System message sent ahead of every Azure AI request.
pub const AZURE_AI_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

static AZURE_OPENAI_URL: OnceLock<Regex> = OnceLock::new();
static AZURE_AI_URL: OnceLock<Regex> = OnceLock::new();

/// Routing parsed out of an Azure OpenAI deployment URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureDeployment {
    /// Resource host, e.g. `myres.openai.azure.com`
    pub host: String,
    /// Deployment name, used as the model name
    pub deployment: String,
    /// `api-version` query value
    pub api_version: String,
}

impl AzureDeployment {
    /// Parse `https://{host}/openai/deployments/{deployment}/chat/completions?api-version={v}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_models::AzureDeployment;
    ///
    /// let d = AzureDeployment::parse(
    ///     "https://res.openai.azure.com/openai/deployments/gpt4o/chat/completions?api-version=2024-02-01",
    /// ).unwrap();
    /// assert_eq!(d.deployment, "gpt4o");
    /// assert_eq!(d.api_version, "2024-02-01");
    /// ```
    pub fn parse(url: &str) -> ModelsResult<Self> {
        let pattern = AZURE_OPENAI_URL.get_or_init(|| {
            Regex::new(r"^https://(.+?)/openai/deployments/(.+?)/chat/completions\?api-version=(.+)")
                .expect("valid Azure OpenAI regex")
        });
        let caps = pattern.captures(url.trim()).ok_or_else(|| {
            ModelsError::new(ModelsErrorKind::InvalidEndpoint(format!(
                "expected https://<host>/openai/deployments/<deployment>/chat/completions?api-version=<version>, got {}",
                url
            )))
        })?;
        Ok(Self {
            host: caps[1].to_string(),
            deployment: caps[2].to_string(),
            api_version: caps[3].to_string(),
        })
    }

    /// Request URL for this deployment.
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/openai/deployments/{}/chat/completions?api-version={}",
            self.host, self.deployment, self.api_version
        )
    }
}

/// Parse an Azure AI inference URL into its canonical chat completions endpoint.
///
/// Accepts `https://{name}.services.ai.azure.com` with optional `/models`,
/// `/chat/completions` and `?api-version=` parts.
///
/// # Examples
///
/// ```
/// use folio_models::azure_ai_endpoint;
///
/// assert_eq!(
///     azure_ai_endpoint("https://lab.services.ai.azure.com").unwrap(),
///     "https://lab.services.ai.azure.com/models/chat/completions?api-version=2024-05-01-preview",
/// );
/// ```
pub fn azure_ai_endpoint(url: &str) -> ModelsResult<String> {
    let pattern = AZURE_AI_URL.get_or_init(|| {
        Regex::new(
            r"^https://(.+?)\.services\.ai\.azure\.com(?:/models)?(?:/chat/completions)?(?:\?api-version=(.+))?",
        )
        .expect("valid Azure AI regex")
    });
    let caps = pattern.captures(url.trim()).ok_or_else(|| {
        ModelsError::new(ModelsErrorKind::InvalidEndpoint(format!(
            "expected https://<endpoint>.services.ai.azure.com/models/chat/completions?api-version=<version>, got {}",
            url
        )))
    })?;
    let api_version = caps
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or(AZURE_AI_DEFAULT_API_VERSION);
    Ok(format!(
        "https://{}.services.ai.azure.com/models/chat/completions?api-version={}",
        &caps[1], api_version
    ))
}

async fn post_with_api_key(
    client: &Client,
    provider: &str,
    endpoint: &str,
    api_key: &str,
    body: &ChatCompletionRequest,
    strip_reasoning: bool,
) -> ModelsResult<GenerateResponse> {
    let request = client.post(endpoint).header("api-key", api_key).json(body);
    let response: ChatCompletionResponse = send_json(provider, request).await?;
    response.into_response(strip_reasoning)
}

/// Azure OpenAI deployment client.
///
/// The deployment in the URL selects the model, so the configured model
/// name is ignored and the deployment name is reported instead.
#[derive(Debug, Clone)]
pub struct AzureOpenAIClient {
    client: Client,
    config: ModelConfig,
    deployment: AzureDeployment,
    endpoint: String,
}

impl AzureOpenAIClient {
    /// Create a client from a deployment URL in `config.base_url`.
    pub fn new(config: &ModelConfig) -> ModelsResult<Self> {
        let deployment = AzureDeployment::parse(config.base_url())?;
        let endpoint = deployment.endpoint();
        debug!(deployment = %deployment.deployment, "Creating Azure OpenAI client");
        Ok(Self {
            client: build_client(config)?,
            config: config.clone(),
            deployment,
            endpoint,
        })
    }

    /// Parsed deployment routing.
    pub fn deployment(&self) -> &AzureDeployment {
        &self.deployment
    }
}

#[async_trait]
impl FolioDriver for AzureOpenAIClient {
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        debug!(deployment = %self.deployment.deployment, "Sending Azure OpenAI request");
        let body = ChatCompletionRequest::new(req, &self.config, None, None);
        let response = with_retry("azure-openai", *self.config.max_retries(), || {
            post_with_api_key(
                &self.client,
                "azure-openai",
                &self.endpoint,
                self.config.api_key(),
                &body,
                *self.config.strip_reasoning(),
            )
        })
        .await?;
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "azure-openai"
    }

    fn model_name(&self) -> &str {
        &self.deployment.deployment
    }
}

/// Azure AI inference client.
#[derive(Debug, Clone)]
pub struct AzureAIClient {
    client: Client,
    config: ModelConfig,
    endpoint: String,
}

impl AzureAIClient {
    /// Create a client from an Azure AI URL in `config.base_url`.
    pub fn new(config: &ModelConfig) -> ModelsResult<Self> {
        let endpoint = azure_ai_endpoint(config.base_url())?;
        debug!(endpoint = %endpoint, "Creating Azure AI client");
        Ok(Self {
            client: build_client(config)?,
            config: config.clone(),
            endpoint,
        })
    }

    /// Canonical chat completions URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FolioDriver for AzureAIClient {
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        let model = req
            .model()
            .clone()
            .unwrap_or_else(|| self.config.model_name().clone());
        debug!(model = %model, "Sending Azure AI request");
        let body =
            ChatCompletionRequest::new(req, &self.config, Some(model), Some(AZURE_AI_SYSTEM_PROMPT));
        let response = with_retry("azure-ai", *self.config.max_retries(), || {
            post_with_api_key(
                &self.client,
                "azure-ai",
                &self.endpoint,
                self.config.api_key(),
                &body,
                *self.config.strip_reasoning(),
            )
        })
        .await?;
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "azure-ai"
    }

    fn model_name(&self) -> &str {
        self.config.model_name()
    }
}
