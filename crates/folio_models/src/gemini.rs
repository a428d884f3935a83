//! Google Gemini client over the `generateContent` REST endpoint.

use crate::http::{build_client, send_json};
use crate::{split_reasoning, with_retry};
use async_trait::async_trait;
use folio_core::{GenerateRequest, GenerateResponse, ModelConfig, Output, Role};
use folio_error::{FolioResult, ModelsError, ModelsErrorKind, ModelsResult};
use folio_interface::FolioDriver;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Public Gemini API root.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    thought: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

impl GeminiRequest {
    fn new(req: &GenerateRequest, config: &ModelConfig) -> Self {
        let text_part = |text: &str| GeminiPart {
            text: text.to_string(),
            thought: false,
        };

        let system_parts: Vec<GeminiPart> = req
            .messages()
            .iter()
            .filter(|m| *m.role() == Role::System)
            .map(|m| text_part(m.content()))
            .collect();

        let contents = req
            .messages()
            .iter()
            .filter(|m| *m.role() != Role::System)
            .map(|m| GeminiContent {
                role: Some(match m.role() {
                    Role::Assistant => "model".to_string(),
                    _ => "user".to_string(),
                }),
                parts: vec![text_part(m.content())],
            })
            .collect();

        Self {
            contents,
            system_instruction: (!system_parts.is_empty()).then_some(GeminiContent {
                role: None,
                parts: system_parts,
            }),
            generation_config: GenerationConfig {
                temperature: req.temperature().unwrap_or(*config.temperature()),
                max_output_tokens: req.max_tokens().unwrap_or(*config.max_tokens()),
            },
        }
    }
}

impl GeminiResponse {
    fn into_response(self, strip_reasoning: bool) -> ModelsResult<GenerateResponse> {
        let content = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| {
                ModelsError::new(ModelsErrorKind::ResponseParse(
                    "response contained no candidates".to_string(),
                ))
            })?;

        let mut outputs = Vec::new();
        let mut answer = String::new();
        for part in content.parts {
            if part.thought {
                outputs.push(Output::Reasoning(part.text));
            } else {
                answer.push_str(&part.text);
            }
        }
        outputs.extend(split_reasoning(&answer, strip_reasoning));

        GenerateResponse::builder()
            .outputs(outputs)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))
    }
}

/// Gemini client.
///
/// The configured base URL is not used; requests go to [`GEMINI_API_BASE`]
/// unless overridden with [`GeminiClient::with_api_base`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: ModelConfig,
    api_base: String,
}

impl GeminiClient {
    /// Create a client for `config.model_name`.
    pub fn new(config: &ModelConfig) -> ModelsResult<Self> {
        debug!(model = %config.model_name(), "Creating Gemini client");
        Ok(Self {
            client: build_client(config)?,
            config: config.clone(),
            api_base: GEMINI_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API root (proxies, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    #[instrument(skip_all, fields(model = %model))]
    async fn send_once(&self, model: &str, body: &GeminiRequest) -> ModelsResult<GenerateResponse> {
        let request = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", self.config.api_key())
            .json(body);
        let response: GeminiResponse = send_json("gemini", request).await?;
        response.into_response(*self.config.strip_reasoning())
    }
}

#[async_trait]
impl FolioDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        let model = req
            .model()
            .clone()
            .unwrap_or_else(|| self.config.model_name().clone());
        let body = GeminiRequest::new(req, &self.config);
        let response = with_retry("gemini", *self.config.max_retries(), || {
            self.send_once(&model, &body)
        })
        .await?;
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        self.config.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Message;

    #[test]
    fn test_system_messages_become_instruction() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::system("be terse"), Message::user("check")])
            .build()
            .unwrap();
        let body = serde_json::to_value(GeminiRequest::new(&req, &ModelConfig::default())).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be terse");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        assert!(body["contents"][0]["parts"][0].get("thought").is_none());
    }

    #[test]
    fn test_thought_parts_become_reasoning() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[
                {"text":"pondering","thought":true},
                {"text":"No conflicts."}
            ]}}]}"#,
        )
        .unwrap();
        let response = response.into_response(true).unwrap();
        assert_eq!(
            response.outputs(),
            &vec![
                Output::Reasoning("pondering".to_string()),
                Output::Text("No conflicts.".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_candidates_is_parse_error() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(response.into_response(true).is_err());
    }

    #[test]
    fn test_endpoint_uses_model_path() {
        let client = GeminiClient::new(&ModelConfig::default())
            .unwrap()
            .with_api_base("http://localhost:9000/v1beta/");
        assert_eq!(
            client.endpoint("gemini-2.0-flash"),
            "http://localhost:9000/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
