//! Chat message type.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message sent to a model.
///
/// # Examples
///
/// ```
/// use folio_core::{Message, Role};
///
/// let message = Message::builder()
///     .role(Role::User)
///     .content("Check chapter 3")
///     .build()
///     .unwrap();
///
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content(), "Check chapter 3");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The message text
    content: String,
}

impl Message {
    /// Creates a new message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Shorthand for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Shorthand for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}
