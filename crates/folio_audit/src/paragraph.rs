//! Paragraph segmentation.

/// Split text into paragraphs on blank-line boundaries.
///
/// `\r\n` is normalised to `\n` first. Each segment is trimmed and empty
/// segments are dropped, so position `k` in the result is paragraph `k + 1`.
///
/// # Examples
///
/// ```
/// use folio_audit::split_paragraphs;
///
/// let paragraphs = split_paragraphs("First.\r\n\r\n\n\nSecond.\n\n   \n\nThird.");
/// assert_eq!(paragraphs, vec!["First.", "Second.", "Third."]);
/// ```
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// First `max_chars` characters of `text`, with `...` appended only when
/// something was cut.
///
/// Counts characters, not bytes, so CJK text is never split mid-codepoint.
///
/// # Examples
///
/// ```
/// use folio_audit::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("short", 50), "short");
/// assert_eq!(truncate_with_ellipsis("主角获得神秘卷轴", 4), "主角获得...");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
