//! Folio - chapter consistency auditing for serialized fiction.
//!
//! Folio checks a freshly written chapter against everything the story has
//! established so far. A reviewer model critiques the chapter against the
//! setting, character state, running summary, open plot threads and the
//! previous chapter; structural checks flag repeated paragraphs; newly
//! announced plot threads are appended to the novel's thread list.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use folio::{NarrativeState, FolioConfig, check_consistency};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FolioConfig::load(None)?;
//!     let state = NarrativeState::new(3)?
//!         .with_novel_setting(std::fs::read_to_string("novel/Novel_architecture.txt")?);
//!     let chapter = std::fs::read_to_string("novel/chapters/chapter_3.txt")?;
//!
//!     let report = check_consistency(
//!         &state,
//!         &chapter,
//!         &config.model_config()?,
//!         Some(Path::new("novel")),
//!     )
//!     .await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `folio_error` - Error types
//! - `folio_core` - Messages, requests, model configuration, narrative state
//! - `folio_interface` - The `FolioDriver` trait
//! - `folio_models` - OpenAI-compatible, Azure and Gemini clients
//! - `folio_storage` - Narrative state storage
//! - `folio_audit` - The audit pipeline
//!
//! This crate re-exports the public surface and adds configuration loading
//! and the `folio` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{FolioConfig, ModelSettings};

pub use folio_audit::{
    AuditConfig, AuditConfigBuilder, AuditOutcome, ConsistencyChecker, ConsistencyReport,
    CritiqueInvoker, CrossChapterCheck, DEFAULT_PREVIEW_CHARS, DEFAULT_SIMILARITY_THRESHOLD,
    DuplicateDetector, DuplicateFinding, EMPTY_CRITIQUE_PLACEHOLDER, PromptComposer,
    PromptLanguage, PromptTemplate, extract_new_plot_arcs, jaccard_similarity, preview,
    split_paragraphs,
};
pub use folio_core::{
    GenerateRequest, GenerateResponse, InterfaceFormat, Message, ModelConfig, ModelConfigBuilder,
    NarrativeState, Output, Role,
};
pub use folio_error::{
    AuditError, AuditErrorKind, ConfigError, FolioError, FolioErrorKind, FolioResult,
    ModelsError, ModelsErrorKind, StorageError, StorageErrorKind,
};
pub use folio_interface::FolioDriver;
pub use folio_models::{
    AzureAIClient, AzureOpenAIClient, GeminiClient, OpenAICompatibleClient, create_driver,
    normalize_base_url,
};
pub use folio_storage::{FileSystemStore, InMemoryStore, NarrativeStore};

use std::path::Path;

/// Audit a chapter with default audit settings.
///
/// With `base_path` set, the previous chapter is read from
/// `<base>/chapters/chapter_<N-1>.txt`, new plot threads are appended to
/// `<base>/plot_arcs.txt` and the report is written to
/// `<base>/consistency_report_chapter_<N>.txt`.
///
/// # Errors
///
/// Only model client failures (after retries) and invalid model
/// configuration are returned. Storage problems are logged.
pub async fn check_consistency(
    state: &NarrativeState,
    chapter_text: &str,
    model_config: &ModelConfig,
    base_path: Option<&Path>,
) -> FolioResult<String> {
    check_consistency_with(
        state,
        chapter_text,
        model_config,
        &AuditConfig::default(),
        base_path,
    )
    .await
}

/// Audit a chapter with explicit audit settings.
///
/// # Errors
///
/// As [`check_consistency`], plus invalid audit settings.
#[tracing::instrument(skip_all, fields(chapter = *state.chapter_index(), format = %model_config.interface_format()))]
pub async fn check_consistency_with(
    state: &NarrativeState,
    chapter_text: &str,
    model_config: &ModelConfig,
    audit_config: &AuditConfig,
    base_path: Option<&Path>,
) -> FolioResult<String> {
    let driver = create_driver(model_config)?;
    let mut checker = ConsistencyChecker::from_config(driver, audit_config)?;
    if let Some(base) = base_path {
        checker = checker.with_store(FileSystemStore::new(base));
    }
    checker.check(state, chapter_text).await
}
