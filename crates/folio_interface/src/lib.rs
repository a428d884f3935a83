//! Trait definitions for the Folio consistency auditor.
//!
//! Model providers implement [`FolioDriver`]; the audit pipeline only ever
//! sees this trait, so tests can substitute scripted drivers.

mod traits;

pub use traits::FolioDriver;
