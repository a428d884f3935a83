//! Model provider clients for the Folio consistency auditor.
//!
//! Every client implements [`folio_interface::FolioDriver`]. Use
//! [`create_driver`] to pick one from a [`folio_core::ModelConfig`]:
//!
//! | Interface format | Client |
//! |---|---|
//! | OpenAI, DeepSeek, Ollama, LM Studio, Aliyun Bailian, Volcano Engine | [`OpenAICompatibleClient`] |
//! | Azure OpenAI | [`AzureOpenAIClient`] |
//! | Azure AI | [`AzureAIClient`] |
//! | Gemini | [`GeminiClient`] |
//!
//! Transient failures (timeouts, 429, 5xx) are retried with exponential
//! backoff; `<think>` blocks are split into reasoning outputs when
//! `strip_reasoning` is set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod azure;
mod base_url;
mod factory;
mod gemini;
mod http;
mod openai_compat;
mod reasoning;
mod retry;

pub use azure::{
    AZURE_AI_DEFAULT_API_VERSION, AZURE_AI_SYSTEM_PROMPT, AzureAIClient, AzureDeployment,
    AzureOpenAIClient, azure_ai_endpoint,
};
pub use base_url::normalize_base_url;
pub use factory::create_driver;
pub use gemini::{GEMINI_API_BASE, GeminiClient};
pub use openai_compat::{OpenAICompatibleClient, VOLCANO_SYSTEM_PROMPT};
pub use reasoning::split_reasoning;
pub use retry::with_retry;
