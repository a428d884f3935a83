//! Endpoint URL normalisation.

use regex::Regex;
use std::sync::OnceLock;

static VERSION_SUFFIX: OnceLock<Regex> = OnceLock::new();

/// Normalise a user-supplied base URL for OpenAI-compatible endpoints.
///
/// - A trailing `#` means "use exactly this URL": the `#` is removed and
///   nothing else changes.
/// - Otherwise `/v1` is appended unless the URL already ends in a version
///   segment (`/v2`, `/v3`, ...) or contains `/v1` somewhere.
///
/// # Examples
///
/// ```
/// use folio_models::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://api.deepseek.com"), "https://api.deepseek.com/v1");
/// assert_eq!(normalize_base_url("https://ark.cn-beijing.volces.com/api/v3"), "https://ark.cn-beijing.volces.com/api/v3");
/// assert_eq!(normalize_base_url("https://proxy.local/custom#"), "https://proxy.local/custom");
/// ```
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    if let Some(verbatim) = url.strip_suffix('#') {
        return verbatim.trim_end_matches('#').to_string();
    }

    let version_suffix =
        VERSION_SUFFIX.get_or_init(|| Regex::new(r"/v\d+$").expect("valid version regex"));
    if !version_suffix.is_match(url) && !url.contains("/v1") {
        return format!("{}/v1", url.trim_end_matches('/'));
    }

    url.to_string()
}
