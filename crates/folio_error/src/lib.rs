//! Error types for the Folio consistency auditor.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Everything converts into [`FolioError`] so callers can use `?` across crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod config;
mod error;
mod models;
mod storage;

pub use audit::{AuditError, AuditErrorKind};
pub use config::ConfigError;
pub use error::{FolioError, FolioErrorKind, FolioResult};
pub use models::{ModelsError, ModelsErrorKind, ModelsResult, RetryableError};
pub use storage::{StorageError, StorageErrorKind};
