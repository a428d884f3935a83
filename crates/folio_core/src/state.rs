//! Narrative state supplied with each audit.

use folio_error::{AuditError, AuditErrorKind, FolioResult};
use serde::{Deserialize, Serialize};

/// Accumulated story context the new chapter is checked against.
///
/// Owned by the caller and rebuilt for every audit.
///
/// # Examples
///
/// ```
/// use folio_core::NarrativeState;
///
/// let state = NarrativeState::new(2)
///     .unwrap()
///     .with_novel_setting("A floating city")
///     .with_plot_arcs("The missing heir");
///
/// assert_eq!(*state.chapter_index(), 2);
/// assert_eq!(state.global_summary(), "");
/// assert!(NarrativeState::new(0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(try_from = "NarrativeStateRecord")]
pub struct NarrativeState {
    /// World and premise description
    novel_setting: String,
    /// Current state of the cast
    character_state: String,
    /// Summary of everything before this chapter
    global_summary: String,
    /// Known unresolved threads, one per line
    plot_arcs: String,
    /// 1-based index of the chapter under audit
    chapter_index: u32,
}

impl NarrativeState {
    /// Empty state for the given chapter.
    ///
    /// # Errors
    ///
    /// Returns an error if `chapter_index` is zero.
    pub fn new(chapter_index: u32) -> FolioResult<Self> {
        if chapter_index == 0 {
            return Err(AuditError::new(AuditErrorKind::InvalidChapterIndex(chapter_index)).into());
        }
        Ok(Self {
            novel_setting: String::new(),
            character_state: String::new(),
            global_summary: String::new(),
            plot_arcs: String::new(),
            chapter_index,
        })
    }

    /// Sets the novel setting.
    pub fn with_novel_setting(mut self, text: impl Into<String>) -> Self {
        self.novel_setting = text.into();
        self
    }

    /// Sets the character state.
    pub fn with_character_state(mut self, text: impl Into<String>) -> Self {
        self.character_state = text.into();
        self
    }

    /// Sets the global summary.
    pub fn with_global_summary(mut self, text: impl Into<String>) -> Self {
        self.global_summary = text.into();
        self
    }

    /// Sets the known plot arcs.
    pub fn with_plot_arcs(mut self, text: impl Into<String>) -> Self {
        self.plot_arcs = text.into();
        self
    }

    /// Index of the chapter before this one, if any.
    pub fn previous_chapter_index(&self) -> Option<u32> {
        self.chapter_index.checked_sub(1).filter(|index| *index > 0)
    }
}

/// Unvalidated wire form of [`NarrativeState`].
#[derive(Deserialize)]
struct NarrativeStateRecord {
    #[serde(default)]
    novel_setting: String,
    #[serde(default)]
    character_state: String,
    #[serde(default)]
    global_summary: String,
    #[serde(default)]
    plot_arcs: String,
    chapter_index: u32,
}

impl TryFrom<NarrativeStateRecord> for NarrativeState {
    type Error = AuditError;

    fn try_from(record: NarrativeStateRecord) -> Result<Self, Self::Error> {
        if record.chapter_index == 0 {
            return Err(AuditError::new(AuditErrorKind::InvalidChapterIndex(0)));
        }
        Ok(Self {
            novel_setting: record.novel_setting,
            character_state: record.character_state,
            global_summary: record.global_summary,
            plot_arcs: record.plot_arcs,
            chapter_index: record.chapter_index,
        })
    }
}
