//! Storage trait for narrative state.

use async_trait::async_trait;
use folio_error::FolioResult;

/// Append `entries` to existing plot-arc content.
///
/// Existing content is kept verbatim. New entries go after a blank line,
/// one per line. With no entries the content is returned unchanged.
///
/// # Examples
///
/// ```
/// use folio_storage::merge_plot_arcs;
///
/// let merged = merge_plot_arcs("X", &["scroll found".to_string()]);
/// assert_eq!(merged, "X\n\nscroll found");
/// assert_eq!(merge_plot_arcs("X", &[]), "X");
/// ```
pub fn merge_plot_arcs(existing: &str, entries: &[String]) -> String {
    if entries.is_empty() {
        return existing.to_string();
    }
    format!("{}\n\n{}", existing, entries.join("\n"))
}

/// Durable home of a novel's narrative state.
///
/// Absence is not an error: a missing chapter or plot-arc file loads as
/// `None`. Errors are reserved for I/O failures on something that exists.
#[async_trait]
pub trait NarrativeStore: Send + Sync {
    /// Full text of chapter `index`, if stored.
    async fn load_chapter(&self, index: u32) -> FolioResult<Option<String>>;

    /// Accumulated plot-arc text, if any has been stored.
    async fn load_plot_arcs(&self) -> FolioResult<Option<String>>;

    /// Replace the plot-arc text.
    async fn save_plot_arcs(&self, content: &str) -> FolioResult<()>;

    /// Store the rendered report for `chapter_index`, replacing any earlier one.
    async fn save_report(&self, chapter_index: u32, report: &str) -> FolioResult<()>;

    /// Read, merge and write back plot-arc entries. Returns the merged text.
    ///
    /// An unreadable plot-arc store is treated as empty so new threads are
    /// never lost to a transient read failure. With no entries nothing is
    /// written, so an unreadable store is never truncated.
    async fn append_plot_arcs(&self, entries: &[String]) -> FolioResult<String> {
        let existing = match self.load_plot_arcs().await {
            Ok(content) => content.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read plot arcs, treating as empty");
                String::new()
            }
        };

        if entries.is_empty() {
            tracing::debug!("No new plot arcs, store left untouched");
            return Ok(existing);
        }

        let merged = merge_plot_arcs(&existing, entries);
        self.save_plot_arcs(&merged).await?;
        tracing::debug!(
            new_entries = entries.len(),
            total_len = merged.len(),
            "Plot arcs updated"
        );
        Ok(merged)
    }
}

#[async_trait]
impl<S: NarrativeStore + ?Sized> NarrativeStore for std::sync::Arc<S> {
    async fn load_chapter(&self, index: u32) -> FolioResult<Option<String>> {
        (**self).load_chapter(index).await
    }

    async fn load_plot_arcs(&self) -> FolioResult<Option<String>> {
        (**self).load_plot_arcs().await
    }

    async fn save_plot_arcs(&self, content: &str) -> FolioResult<()> {
        (**self).save_plot_arcs(content).await
    }

    async fn save_report(&self, chapter_index: u32, report: &str) -> FolioResult<()> {
        (**self).save_report(chapter_index, report).await
    }

    async fn append_plot_arcs(&self, entries: &[String]) -> FolioResult<String> {
        (**self).append_plot_arcs(entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_into_empty_store_keeps_separator() {
        assert_eq!(merge_plot_arcs("", &["a".to_string()]), "\n\na");
    }

    #[test]
    fn test_merge_joins_entries_with_newlines() {
        let entries = vec!["one".to_string(), "two".to_string()];
        assert_eq!(merge_plot_arcs("old", &entries), "old\n\none\ntwo");
    }

    #[test]
    fn test_merge_never_shrinks() {
        let mut content = String::from("seed");
        for round in 0..5 {
            let before = content.len();
            let entries: Vec<String> = (0..round).map(|i| format!("thread {}", i)).collect();
            content = merge_plot_arcs(&content, &entries);
            assert!(content.len() >= before);
            assert!(content.starts_with("seed"));
        }
    }
}
