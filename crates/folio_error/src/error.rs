//! Top-level error wrapper types.

use crate::{AuditError, ConfigError, ModelsError, StorageError};

/// Every error the Folio crates can produce.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::FileRead("plot_arcs.txt".into()));
/// let err: FolioError = storage_err.into();
/// assert!(format!("{}", err).contains("plot_arcs.txt"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FolioErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Audit pipeline error
    #[from(AuditError)]
    Audit(AuditError),
}

/// Folio error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Folio Error: {}", _0)]
pub struct FolioError(Box<FolioErrorKind>);

impl FolioError {
    /// Create a new error from a kind.
    pub fn new(kind: FolioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FolioErrorKind {
        &self.0
    }

    /// True when this error is the empty-critique condition.
    pub fn is_empty_critique(&self) -> bool {
        matches!(
            self.kind(),
            FolioErrorKind::Audit(AuditError {
                kind: crate::AuditErrorKind::EmptyCritiqueResponse,
                ..
            })
        )
    }
}

// Generic From implementation for any type that converts to FolioErrorKind
impl<T> From<T> for FolioError
where
    T: Into<FolioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Folio operations.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioResult, ConfigError};
///
/// fn load() -> FolioResult<String> {
///     Err(ConfigError::new("no model configured"))?
/// }
///
/// assert!(load().is_err());
/// ```
pub type FolioResult<T> = std::result::Result<T, FolioError>;
