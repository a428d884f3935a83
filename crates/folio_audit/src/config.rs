//! Audit settings.

use crate::{DEFAULT_PREVIEW_CHARS, DEFAULT_SIMILARITY_THRESHOLD, PromptLanguage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tunables for one [`ConsistencyChecker`](crate::ConsistencyChecker).
///
/// # Examples
///
/// ```
/// use folio_audit::{AuditConfig, PromptLanguage};
///
/// let config = AuditConfig::builder()
///     .similarity_threshold(0.9)
///     .prompt_language(PromptLanguage::Zh)
///     .build()
///     .unwrap();
///
/// assert_eq!(*config.similarity_threshold(), 0.9);
/// assert_eq!(*config.preview_chars(), 500);
/// assert!(config.prompt_template_path().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), default)]
pub struct AuditConfig {
    /// Duplicate threshold in `[0, 1]`
    #[serde(default = "default_similarity_threshold")]
    similarity_threshold: f64,
    /// Characters of the previous chapter shown in the prompt
    #[serde(default = "default_preview_chars")]
    preview_chars: usize,
    /// Built-in template language
    #[serde(default)]
    prompt_language: PromptLanguage,
    /// Custom template file; overrides `prompt_language`
    #[serde(default)]
    prompt_template_path: Option<PathBuf>,
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            preview_chars: default_preview_chars(),
            prompt_language: PromptLanguage::default(),
            prompt_template_path: None,
        }
    }
}

impl AuditConfig {
    /// Creates a new config builder.
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::default()
    }
}
