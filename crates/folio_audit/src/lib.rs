//! Chapter consistency auditing for serialized fiction.
//!
//! Given a freshly written chapter and the story's accumulated state, the
//! [`ConsistencyChecker`] asks a reviewer model for a critique, scans the
//! chapter for repeated paragraphs (within itself and against the previous
//! chapter), pulls newly announced plot threads out of the critique, and
//! writes the combined report and the extended thread list back to a
//! [`folio_storage::NarrativeStore`].
//!
//! The building blocks are usable on their own:
//!
//! - [`split_paragraphs`] and [`jaccard_similarity`] for text comparison
//! - [`DuplicateDetector`] for the pairwise duplicate scan
//! - [`PromptComposer`] and [`PromptTemplate`] for the critique prompt
//! - [`extract_new_plot_arcs`] for thread extraction
//! - [`ConsistencyReport`] for rendering

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod critique;
mod duplicates;
mod paragraph;
mod plot_arcs;
mod prompt;
mod report;
mod similarity;

pub use checker::ConsistencyChecker;
pub use config::{AuditConfig, AuditConfigBuilder, AuditConfigBuilderError};
pub use critique::CritiqueInvoker;
pub use duplicates::{
    DEFAULT_SIMILARITY_THRESHOLD, DuplicateDetector, DuplicateFinding, EXCERPT_CHARS,
};
pub use paragraph::{split_paragraphs, truncate_with_ellipsis};
pub use plot_arcs::extract_new_plot_arcs;
pub use prompt::{
    DEFAULT_PREVIEW_CHARS, PromptComposer, PromptFields, PromptLanguage, PromptTemplate, preview,
};
pub use report::{AuditOutcome, ConsistencyReport, CrossChapterCheck, EMPTY_CRITIQUE_PLACEHOLDER};
pub use similarity::jaccard_similarity;
