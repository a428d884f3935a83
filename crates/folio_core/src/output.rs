//! Output types from model responses.

use serde::{Deserialize, Serialize};

/// One piece of model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Answer text.
    Text(String),
    /// Chain-of-thought text some models emit alongside the answer
    /// (`<think>` blocks or a separate `reasoning_content` field).
    Reasoning(String),
}
