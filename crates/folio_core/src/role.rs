//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Sender of a chat message.
///
/// # Examples
///
/// ```
/// use folio_core::Role;
///
/// assert_eq!(Role::System.as_ref(), "system");
/// assert_eq!(format!("{}", Role::User), "User");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages carry the prompt
    User,
    /// Assistant messages are from the model
    Assistant,
}
