//! Consistency audit error types.

/// Specific error conditions for the audit pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AuditErrorKind {
    /// The reviewer model returned nothing usable
    #[display("Critique response was empty")]
    EmptyCritiqueResponse,
    /// Chapter indices start at 1
    #[display("Chapter index must be positive, got {}", _0)]
    InvalidChapterIndex(u32),
    /// Prompt template is unusable
    #[display("Invalid prompt template: {}", _0)]
    InvalidTemplate(String),
    /// Similarity threshold outside [0, 1]
    #[display("Invalid similarity threshold: {}", _0)]
    InvalidThreshold(String),
}

/// Error type for audit operations.
///
/// # Examples
///
/// ```
/// use folio_error::{AuditError, AuditErrorKind};
///
/// let err = AuditError::new(AuditErrorKind::EmptyCritiqueResponse);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Audit Error: {} at line {} in {}", kind, line, file)]
pub struct AuditError {
    /// The specific error condition
    pub kind: AuditErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl AuditError {
    /// Create a new AuditError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AuditErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
