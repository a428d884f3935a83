//! Extraction of newly announced plot threads from a critique.

use regex::Regex;
use std::sync::OnceLock;

static LIST_MARKER: OnceLock<Regex> = OnceLock::new();
static LEAD_IN: OnceLock<Regex> = OnceLock::new();

fn list_marker() -> &'static Regex {
    LIST_MARKER.get_or_init(|| {
        Regex::new(r"^(?:#+|[-*+•·]|\d+[.)、]|[(（]\d+[)）])\s*").expect("valid list marker regex")
    })
}

fn lead_in() -> &'static Regex {
    LEAD_IN.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:新增的剧情要点或未解决冲突|新增剧情要点|新剧情要点|新增冲突|新冲突|new\s+unresolved\s+conflict|new\s+conflict|new\s+plot\s+thread|new\s+plot\s+point)",
        )
        .expect("valid lead-in regex")
    })
}

/// Strip markdown list markers and headings from the start of a line.
fn strip_list_marker(line: &str) -> String {
    list_marker().replace(line.trim(), "").into_owned()
}

/// Split a line at its first `:` or `：` into an emphasis-free lead-in and
/// the verbatim content after it.
fn split_lead_in(line: &str) -> Option<(String, &str)> {
    let colon = line.find([':', '：'])?;
    let delimiter_len = line[colon..].chars().next().map_or(1, char::len_utf8);
    let head = line[..colon].replace("**", "").replace("__", "");
    // Closing emphasis of a lead-in written as `**New plot thread:**`
    let content = line[colon + delimiter_len..]
        .trim_start()
        .trim_start_matches("**")
        .trim_start_matches("__");
    let head = head.trim().trim_matches(['*', '_']).trim();
    Some((head.to_string(), content.trim()))
}

/// Plot threads the reviewer announced as new, in order of appearance.
///
/// A line counts when, after list markers are removed and ignoring bold
/// around the lead-in, it starts with a recognised lead-in such as `新增剧情要点` or `New plot thread`
/// (case-insensitive). The entry is the text after the first `:` or `：`,
/// kept as written; lines without a colon or with nothing after it are
/// skipped.
///
/// # Examples
///
/// ```
/// use folio_audit::extract_new_plot_arcs;
///
/// let critique = "No contradictions.\n\
///     新增剧情要点: 主角获得神秘卷轴\n\
///     - **New plot thread**: the lighthouse keeper is missing\n\
///     New conflict without colon";
///
/// assert_eq!(
///     extract_new_plot_arcs(critique),
///     vec!["主角获得神秘卷轴", "the lighthouse keeper is missing"],
/// );
/// ```
pub fn extract_new_plot_arcs(critique: &str) -> Vec<String> {
    critique
        .lines()
        .map(strip_list_marker)
        .filter_map(|line| {
            let (head, content) = split_lead_in(&line)?;
            (lead_in().is_match(&head) && !content.is_empty()).then(|| content.to_string())
        })
        .collect()
}
