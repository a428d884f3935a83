//! Core data types for the Folio consistency auditor.
//!
//! This crate holds the values that cross crate boundaries: chat messages,
//! generation requests and responses, model configuration and the
//! narrative state an audit runs against.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod model;
mod output;
mod request;
mod role;
mod state;

pub use message::{Message, MessageBuilder, MessageBuilderError};
pub use model::{InterfaceFormat, ModelConfig, ModelConfigBuilder, ModelConfigBuilderError};
pub use output::Output;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse,
    GenerateResponseBuilder, GenerateResponseBuilderError,
};
pub use role::Role;
pub use state::NarrativeState;
