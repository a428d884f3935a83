//! Configuration loading.
//!
//! Sources, lowest precedence first:
//!
//! 1. Bundled defaults (`folio.toml` compiled into the binary)
//! 2. `~/.config/folio/folio.toml`
//! 3. `./folio.toml`
//! 4. A file passed explicitly (`--config`)
//! 5. `FOLIO__<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use folio_audit::AuditConfig;
use folio_core::{InterfaceFormat, ModelConfig};
use folio_error::{ConfigError, FolioResult, ModelsError, ModelsErrorKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

const DEFAULT_CONFIG: &str = include_str!("../../../folio.toml");

/// `[model]` section as written by users.
///
/// Every key is optional; missing keys fall back to [`ModelConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ModelSettings {
    /// Protocol family
    #[serde(default)]
    interface_format: Option<InterfaceFormat>,
    /// Endpoint base URL
    #[serde(default)]
    base_url: Option<String>,
    /// Model or deployment identifier
    #[serde(default)]
    model_name: Option<String>,
    /// Inline credential
    #[serde(default)]
    api_key: Option<String>,
    /// Environment variable holding the credential
    #[serde(default)]
    api_key_env: Option<String>,
    /// Sampling temperature
    #[serde(default)]
    temperature: Option<f32>,
    /// Maximum output tokens
    #[serde(default)]
    max_tokens: Option<u32>,
    /// Per-request timeout in seconds
    #[serde(default)]
    timeout_secs: Option<u64>,
    /// Retries for transient failures
    #[serde(default)]
    max_retries: Option<usize>,
    /// Move `<think>` blocks out of the critique
    #[serde(default)]
    strip_reasoning: Option<bool>,
}

impl ModelSettings {
    /// Credential from `api_key`, or else from the variable named by `api_key_env`.
    fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        let var = self.api_key_env.as_ref()?;
        match std::env::var(var) {
            Ok(key) => Some(key),
            Err(_) => {
                debug!(var = %var, "API key environment variable not set");
                None
            }
        }
    }

    /// Build the client configuration.
    pub fn to_model_config(&self) -> FolioResult<ModelConfig> {
        let mut builder = ModelConfig::builder();
        if let Some(format) = self.interface_format {
            builder.interface_format(format);
        }
        if let Some(base_url) = &self.base_url {
            builder.base_url(base_url.clone());
        }
        if let Some(model_name) = &self.model_name {
            builder.model_name(model_name.clone());
        }
        if let Some(api_key) = self.resolve_api_key() {
            builder.api_key(api_key);
        }
        if let Some(temperature) = self.temperature {
            builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            builder.max_tokens(max_tokens);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            builder.timeout_secs(timeout_secs);
        }
        if let Some(max_retries) = self.max_retries {
            builder.max_retries(max_retries);
        }
        if let Some(strip_reasoning) = self.strip_reasoning {
            builder.strip_reasoning(strip_reasoning);
        }

        let config = builder
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;

        if config.api_key().is_empty()
            && !matches!(
                config.interface_format(),
                InterfaceFormat::Ollama | InterfaceFormat::LmStudio
            )
        {
            warn!(format = %config.interface_format(), "No API key configured");
        }
        Ok(config)
    }
}

/// Complete Folio configuration.
///
/// # Examples
///
/// ```
/// use folio::FolioConfig;
///
/// let config = FolioConfig::from_toml_str(r#"
///     [model]
///     interface_format = "DeepSeek"
///     base_url = "https://api.deepseek.com"
///     model_name = "deepseek-chat"
///     api_key = "sk-test"
/// "#).unwrap();
///
/// let model = config.model_config().unwrap();
/// assert_eq!(model.model_name(), "deepseek-chat");
/// assert_eq!(*config.audit().similarity_threshold(), 0.8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FolioConfig {
    /// `[model]` section
    #[serde(default)]
    model: ModelSettings,
    /// `[audit]` section
    #[serde(default)]
    audit: AuditConfig,
}

impl FolioConfig {
    /// Load configuration from every source.
    ///
    /// # Errors
    ///
    /// Fails if `explicit` does not exist or any source fails to parse.
    pub fn load(explicit: Option<&Path>) -> FolioResult<Self> {
        debug!("Loading configuration: bundled < home < current dir < explicit < env");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/folio/folio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("folio").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Parse a TOML document layered over the bundled defaults.
    pub fn from_toml_str(toml: &str) -> FolioResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> FolioResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        debug!(
            format = ?config.model.interface_format,
            model = ?config.model.model_name,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Resolved model client configuration.
    pub fn model_config(&self) -> FolioResult<ModelConfig> {
        self.model.to_model_config()
    }

    /// Replace the audit section.
    pub fn with_audit(mut self, audit: AuditConfig) -> Self {
        self.audit = audit;
        self
    }
}
