//! Separating reasoning blocks from answer text.

use folio_core::Output;
use regex::Regex;
use std::sync::OnceLock;

static THINK_BLOCK: OnceLock<Regex> = OnceLock::new();

fn think_block() -> &'static Regex {
    THINK_BLOCK.get_or_init(|| Regex::new(r"(?s)<think>(.*?)</think>").expect("valid think regex"))
}

/// Turn raw model text into outputs.
///
/// With `strip` set, every `<think>...</think>` block becomes an
/// [`Output::Reasoning`] and the remaining text (trimmed) becomes the
/// [`Output::Text`]. Without it the raw text is passed through untouched.
///
/// # Examples
///
/// ```
/// use folio_core::Output;
/// use folio_models::split_reasoning;
///
/// let outputs = split_reasoning("<think>hmm</think>\nAll good.", true);
/// assert_eq!(outputs, vec![
///     Output::Reasoning("hmm".to_string()),
///     Output::Text("All good.".to_string()),
/// ]);
/// ```
pub fn split_reasoning(raw: &str, strip: bool) -> Vec<Output> {
    if !strip {
        return vec![Output::Text(raw.to_string())];
    }

    let pattern = think_block();
    let mut outputs: Vec<Output> = pattern
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|thought| !thought.is_empty())
        .map(|thought| Output::Reasoning(thought.to_string()))
        .collect();

    let answer = pattern.replace_all(raw, "");
    outputs.push(Output::Text(answer.trim().to_string()));
    outputs
}
