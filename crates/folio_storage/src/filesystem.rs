//! Filesystem-backed narrative store.

use crate::layout::{CHAPTERS_DIR, PLOT_ARCS_FILE, chapter_file_name, report_file_name};
use crate::NarrativeStore;
use folio_error::{FolioResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Narrative store over a novel's working directory.
///
/// Nothing is created until the first write; reads of missing files
/// return `None`. A read-only store serves reads and skips every write.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base_path: PathBuf,
    read_only: bool,
}

impl FileSystemStore {
    /// Create a store rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            read_only: false,
        }
    }

    /// Turn every write into a logged no-op.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Whether writes are skipped.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of chapter `index`.
    pub fn chapter_path(&self, index: u32) -> PathBuf {
        self.base_path
            .join(CHAPTERS_DIR)
            .join(chapter_file_name(index))
    }

    /// Path of the plot-arc file.
    pub fn plot_arcs_path(&self) -> PathBuf {
        self.base_path.join(PLOT_ARCS_FILE)
    }

    /// Path of the report for `chapter_index`.
    pub fn report_path(&self, chapter_index: u32) -> PathBuf {
        self.base_path.join(report_file_name(chapter_index))
    }

    /// Read a file relative to the base path, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidPath`] for absolute or escaping
    /// paths and [`StorageErrorKind::FileRead`] for other I/O failures.
    pub async fn read_relative(&self, relative: impl AsRef<Path>) -> FolioResult<Option<String>> {
        let relative = relative.as_ref();
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(
                relative.display().to_string(),
            ))
            .into());
        }
        read_optional(&self.base_path.join(relative)).await
    }
}

/// Read a UTF-8 file, mapping `NotFound` to `None`.
pub(crate) async fn read_optional(path: &Path) -> FolioResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            tracing::debug!(path = %path.display(), bytes = content.len(), "Read file");
            Ok(Some(content))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "File not found");
            Ok(None)
        }
        Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()),
    }
}

async fn write_creating_parents(path: &Path, content: &str) -> FolioResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    tokio::fs::write(path, content).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

#[async_trait::async_trait]
impl NarrativeStore for FileSystemStore {
    #[tracing::instrument(skip(self))]
    async fn load_chapter(&self, index: u32) -> FolioResult<Option<String>> {
        read_optional(&self.chapter_path(index)).await
    }

    #[tracing::instrument(skip(self))]
    async fn load_plot_arcs(&self) -> FolioResult<Option<String>> {
        read_optional(&self.plot_arcs_path()).await
    }

    #[tracing::instrument(skip(self, content), fields(bytes = content.len()))]
    async fn save_plot_arcs(&self, content: &str) -> FolioResult<()> {
        if self.read_only {
            tracing::info!("Read-only store, not writing plot arcs");
            return Ok(());
        }
        write_creating_parents(&self.plot_arcs_path(), content).await
    }

    #[tracing::instrument(skip(self, report), fields(bytes = report.len()))]
    async fn save_report(&self, chapter_index: u32, report: &str) -> FolioResult<()> {
        if self.read_only {
            tracing::info!(chapter_index, "Read-only store, not writing report");
            return Ok(());
        }
        let path = self.report_path(chapter_index);
        write_creating_parents(&path, report).await?;
        tracing::info!(path = %path.display(), "Saved consistency report");
        Ok(())
    }
}
