//! In-memory narrative store.

use crate::NarrativeStore;
use folio_error::FolioResult;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Narrative store held in memory.
///
/// # Examples
///
/// ```
/// use folio_storage::{InMemoryStore, NarrativeStore};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = InMemoryStore::new().with_plot_arcs("X");
/// store.append_plot_arcs(&["new thread".to_string()]).await.unwrap();
/// assert_eq!(store.plot_arcs().await.as_deref(), Some("X\n\nnew thread"));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    chapters: RwLock<HashMap<u32, String>>,
    plot_arcs: RwLock<Option<String>>,
    reports: RwLock<HashMap<u32, String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed chapter `index`.
    pub fn with_chapter(mut self, index: u32, text: impl Into<String>) -> Self {
        self.chapters.get_mut().insert(index, text.into());
        self
    }

    /// Seed the plot-arc text.
    pub fn with_plot_arcs(mut self, content: impl Into<String>) -> Self {
        *self.plot_arcs.get_mut() = Some(content.into());
        self
    }

    /// Current plot-arc text.
    pub async fn plot_arcs(&self) -> Option<String> {
        self.plot_arcs.read().await.clone()
    }

    /// Stored report for `chapter_index`.
    pub async fn report(&self, chapter_index: u32) -> Option<String> {
        self.reports.read().await.get(&chapter_index).cloned()
    }

    /// Number of stored reports.
    pub async fn report_count(&self) -> usize {
        self.reports.read().await.len()
    }
}

#[async_trait::async_trait]
impl NarrativeStore for InMemoryStore {
    async fn load_chapter(&self, index: u32) -> FolioResult<Option<String>> {
        Ok(self.chapters.read().await.get(&index).cloned())
    }

    async fn load_plot_arcs(&self) -> FolioResult<Option<String>> {
        Ok(self.plot_arcs.read().await.clone())
    }

    async fn save_plot_arcs(&self, content: &str) -> FolioResult<()> {
        *self.plot_arcs.write().await = Some(content.to_string());
        Ok(())
    }

    async fn save_report(&self, chapter_index: u32, report: &str) -> FolioResult<()> {
        self.reports
            .write()
            .await
            .insert(chapter_index, report.to_string());
        Ok(())
    }
}
