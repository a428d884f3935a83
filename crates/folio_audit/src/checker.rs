//! The consistency audit pipeline.

use crate::{
    AuditConfig, AuditOutcome, ConsistencyReport, CritiqueInvoker, CrossChapterCheck,
    DuplicateDetector, PromptComposer, PromptTemplate, extract_new_plot_arcs,
};
use folio_core::NarrativeState;
use folio_error::FolioResult;
use folio_interface::FolioDriver;
use folio_storage::NarrativeStore;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Audits a new chapter against the accumulated narrative state.
///
/// One call runs, in order: fetch the previous chapter (when a store is
/// attached), compose the prompt, ask the reviewer model, scan for
/// duplicate paragraphs, extract newly announced plot threads, assemble the
/// report and persist it. Without a store nothing is read or written.
///
/// # Examples
///
/// ```rust,ignore
/// use folio_audit::ConsistencyChecker;
/// use folio_models::create_driver;
/// use folio_storage::FileSystemStore;
///
/// let checker = ConsistencyChecker::new(create_driver(&model_config)?)
///     .with_store(FileSystemStore::new("novel"));
/// let report = checker.check(&state, &chapter_text).await?;
/// println!("{}", report);
/// ```
pub struct ConsistencyChecker<D> {
    invoker: CritiqueInvoker<D>,
    composer: PromptComposer,
    detector: DuplicateDetector,
    store: Option<Arc<dyn NarrativeStore>>,
}

impl<D: FolioDriver> ConsistencyChecker<D> {
    /// Checker with the English template, default threshold and no store.
    pub fn new(driver: D) -> Self {
        Self {
            invoker: CritiqueInvoker::new(driver),
            composer: PromptComposer::default(),
            detector: DuplicateDetector::default(),
            store: None,
        }
    }

    /// Checker configured from [`AuditConfig`].
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range threshold or an unreadable or invalid
    /// custom template.
    pub fn from_config(driver: D, config: &AuditConfig) -> FolioResult<Self> {
        let template = match config.prompt_template_path() {
            Some(path) => PromptTemplate::from_file(path)?,
            None => PromptTemplate::for_language(*config.prompt_language()),
        };

        Ok(Self::new(driver)
            .with_template(template)
            .with_preview_chars(*config.preview_chars())
            .with_detector(DuplicateDetector::new(*config.similarity_threshold())?))
    }

    /// Use a different prompt template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        let preview_chars = *self.composer.preview_chars();
        self.composer = PromptComposer::new(template);
        if let Some(chars) = preview_chars {
            self.composer = self.composer.with_preview_chars(chars);
        }
        self
    }

    /// Show `chars` characters of the previous chapter in the prompt.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.composer = self.composer.with_preview_chars(chars);
        self
    }

    /// Use a different duplicate detector.
    pub fn with_detector(mut self, detector: DuplicateDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Read the previous chapter from, and persist results to, `store`.
    pub fn with_store(mut self, store: impl NarrativeStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Share an existing store.
    pub fn with_shared_store(mut self, store: Arc<dyn NarrativeStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Audit `chapter_text` and return the rendered report.
    ///
    /// An empty critique yields the fixed placeholder text.
    ///
    /// # Errors
    ///
    /// Only model transport and API failures are returned.
    pub async fn check(&self, state: &NarrativeState, chapter_text: &str) -> FolioResult<String> {
        Ok(self.audit(state, chapter_text).await?.to_string())
    }

    /// Audit `chapter_text` and return the structured outcome.
    ///
    /// # Errors
    ///
    /// Only model transport and API failures are returned.
    #[instrument(skip_all, fields(chapter = *state.chapter_index(), chapter_len = chapter_text.len()))]
    pub async fn audit(
        &self,
        state: &NarrativeState,
        chapter_text: &str,
    ) -> FolioResult<AuditOutcome> {
        let previous_chapter = self.load_previous_chapter(state).await;

        let prompt = self
            .composer
            .compose(state, chapter_text, previous_chapter.as_deref());

        let critique = match self.invoker.critique(&prompt).await {
            Ok(critique) => critique,
            Err(e) if e.is_empty_critique() => {
                warn!("No critique received, skipping checks and persistence");
                return Ok(AuditOutcome::NoResponse);
            }
            Err(e) => return Err(e),
        };

        let current_duplicates = self.detector.find_in_chapter(chapter_text);
        let cross_chapter = match &previous_chapter {
            Some(previous) => {
                CrossChapterCheck::Checked(self.detector.find_against_previous(chapter_text, previous))
            }
            None => CrossChapterCheck::Skipped,
        };
        let new_plot_arcs = extract_new_plot_arcs(&critique);

        info!(
            current_duplicates = current_duplicates.len(),
            previous_checked = previous_chapter.is_some(),
            new_plot_arcs = new_plot_arcs.len(),
            "Audit complete"
        );

        let report =
            ConsistencyReport::new(critique, current_duplicates, cross_chapter, new_plot_arcs);
        self.persist(*state.chapter_index(), &report).await;

        Ok(AuditOutcome::Report(report))
    }

    async fn load_previous_chapter(&self, state: &NarrativeState) -> Option<String> {
        let Some(previous_index) = state.previous_chapter_index() else {
            info!("First chapter, skipping previous-chapter duplicate check");
            return None;
        };
        let Some(store) = &self.store else {
            debug!("No store attached, skipping previous-chapter duplicate check");
            return None;
        };

        match store.load_chapter(previous_index).await {
            Ok(Some(text)) => {
                debug!(previous_index, len = text.len(), "Loaded previous chapter");
                Some(text)
            }
            Ok(None) => {
                warn!(
                    previous_index,
                    "Previous chapter not found, skipping previous-chapter duplicate check"
                );
                None
            }
            Err(e) => {
                warn!(previous_index, error = %e, "Failed to read previous chapter, skipping check");
                None
            }
        }
    }

    async fn persist(&self, chapter_index: u32, report: &ConsistencyReport) {
        let Some(store) = &self.store else {
            return;
        };

        if let Err(e) = store.append_plot_arcs(report.new_plot_arcs()).await {
            warn!(error = %e, "Failed to update plot arcs");
        }
        if let Err(e) = store.save_report(chapter_index, &report.to_string()).await {
            warn!(error = %e, chapter_index, "Failed to save consistency report");
        }
    }
}
