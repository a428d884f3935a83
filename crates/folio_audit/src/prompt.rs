//! Critique prompt templates and composition.

use crate::truncate_with_ellipsis;
use folio_core::NarrativeState;
use folio_error::{AuditError, AuditErrorKind, FolioResult, StorageError, StorageErrorKind};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Characters of the previous chapter included in the prompt.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

const CHAPTER_TEXT_PLACEHOLDER: &str = "{chapter_text}";

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

const ENGLISH_TEMPLATE: &str = "\
Check whether the latest chapter below contradicts or is inconsistent with the story so far, and list any problems you find.

- Novel setting:
{novel_setting}

- Character state (may contain important details):
{character_state}

- Summary of earlier chapters:
{global_summary}

- Recorded unresolved conflicts and plot threads:
{plot_arcs}

- Opening of the previous chapter (empty for the first chapter):
{previous_chapter_summary}

- Latest chapter:
{chapter_text}

**Pay particular attention to anything in the latest chapter that conflicts with the setting, the character state, the summary, the recorded plot threads or the previous chapter.**
**Describe every conflict or inconsistency in detail.**
**Check whether the latest chapter naturally continues the recorded plot threads and unresolved conflicts.**
**If the latest chapter introduces new plot threads or unresolved conflicts, list each one on its own line starting with \"New plot thread:\".**

If there are conflicts, inconsistencies or repeated passages, explain them; if a recorded thread has been neglected or needs to move forward, say so. Otherwise reply \"No obvious conflicts; the chapter reads smoothly.\"
";

const CHINESE_TEMPLATE: &str = "\
请检查下面的小说设定与最新章节是否存在明显冲突或不一致之处，如有请列出：
- 小说设定：
{novel_setting}

- 角色状态（可能包含重要信息）：
{character_state}

- 前文摘要：
{global_summary}

- 已记录的未解决冲突或剧情要点：
{plot_arcs}

- 上一章内容概要（如果存在）：
{previous_chapter_summary}

- 最新章节内容：
{chapter_text}

**请特别留意最新章节中是否存在与小说设定、角色状态、全局摘要、剧情要点或上一章内容相冲突或不一致的地方。**
**如果发现任何冲突或不一致，请详细描述。**
**此外，请检查最新章节是否自然地延续了已有的剧情要点和未解决冲突。**
**如果最新章节 *引入了新的剧情要点或未解决冲突*，请逐行列出，每行以“新增剧情要点：”开头。**

如果存在冲突、不一致或重复段落，请详细说明；如果在未解决冲突中有被忽略或需要推进的地方，也请提及；否则请返回\"无明显冲突，章节内容流畅\"。
";

/// Language of the built-in prompt template.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PromptLanguage {
    /// English
    #[default]
    #[display("en")]
    En,
    /// Chinese
    #[display("zh")]
    Zh,
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct PromptFields<'a> {
    /// `{novel_setting}`
    pub novel_setting: &'a str,
    /// `{character_state}`
    pub character_state: &'a str,
    /// `{global_summary}`
    pub global_summary: &'a str,
    /// `{plot_arcs}`
    pub plot_arcs: &'a str,
    /// `{previous_chapter_summary}`
    pub previous_chapter_summary: &'a str,
    /// `{chapter_text}`
    pub chapter_text: &'a str,
}

/// Immutable critique prompt template.
///
/// Placeholders are `{novel_setting}`, `{character_state}`,
/// `{global_summary}`, `{plot_arcs}`, `{previous_chapter_summary}` and
/// `{chapter_text}`. Values are inserted verbatim in a single pass, so text
/// that itself looks like a placeholder is never expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::english()
    }
}

impl PromptTemplate {
    /// Built-in English template.
    pub fn english() -> Self {
        Self {
            source: ENGLISH_TEMPLATE.to_string(),
        }
    }

    /// Built-in Chinese template.
    pub fn chinese() -> Self {
        Self {
            source: CHINESE_TEMPLATE.to_string(),
        }
    }

    /// Built-in template for `language`.
    pub fn for_language(language: PromptLanguage) -> Self {
        match language {
            PromptLanguage::En => Self::english(),
            PromptLanguage::Zh => Self::chinese(),
        }
    }

    /// User-supplied template.
    ///
    /// # Errors
    ///
    /// Returns [`AuditErrorKind::InvalidTemplate`] when the template has no
    /// `{chapter_text}` placeholder.
    pub fn custom(source: impl Into<String>) -> FolioResult<Self> {
        let source = source.into();
        if !source.contains(CHAPTER_TEXT_PLACEHOLDER) {
            return Err(AuditError::new(AuditErrorKind::InvalidTemplate(format!(
                "template must contain {}",
                CHAPTER_TEXT_PLACEHOLDER
            )))
            .into());
        }
        Ok(Self { source })
    }

    /// Load a custom template from a UTF-8 file.
    pub fn from_file(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        tracing::info!(path = %path.display(), "Loaded custom prompt template");
        Self::custom(source)
    }

    /// Raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute `fields` into the template.
    pub fn render(&self, fields: &PromptFields<'_>) -> String {
        let pattern = PLACEHOLDER.get_or_init(|| {
            Regex::new(
                r"\{(novel_setting|character_state|global_summary|plot_arcs|previous_chapter_summary|chapter_text)\}",
            )
            .expect("valid placeholder regex")
        });

        pattern
            .replace_all(&self.source, |caps: &Captures<'_>| match &caps[1] {
                "novel_setting" => fields.novel_setting,
                "character_state" => fields.character_state,
                "global_summary" => fields.global_summary,
                "plot_arcs" => fields.plot_arcs,
                "previous_chapter_summary" => fields.previous_chapter_summary,
                _ => fields.chapter_text,
            })
            .into_owned()
    }
}

/// Shorten the previous chapter for the prompt.
///
/// # Examples
///
/// ```
/// use folio_audit::preview;
///
/// assert_eq!(preview("short chapter", 500), "short chapter");
/// assert_eq!(preview(&"x".repeat(600), 500).len(), 503);
/// ```
pub fn preview(previous_chapter: &str, max_chars: usize) -> String {
    truncate_with_ellipsis(previous_chapter, max_chars)
}

/// Builds critique prompts from narrative state.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct PromptComposer {
    template: PromptTemplate,
    preview_chars: Option<usize>,
}

impl PromptComposer {
    /// Composer using `template`.
    pub fn new(template: PromptTemplate) -> Self {
        Self {
            template,
            preview_chars: None,
        }
    }

    /// Override how much of the previous chapter is shown.
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = Some(preview_chars);
        self
    }

    fn effective_preview_chars(&self) -> usize {
        self.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS)
    }

    /// Render the prompt. `previous_chapter` is the full previous chapter;
    /// only its preview reaches the prompt.
    pub fn compose(
        &self,
        state: &NarrativeState,
        chapter_text: &str,
        previous_chapter: Option<&str>,
    ) -> String {
        let previous_chapter_summary = previous_chapter
            .map(|text| preview(text, self.effective_preview_chars()))
            .unwrap_or_default();

        self.template.render(&PromptFields {
            novel_setting: state.novel_setting(),
            character_state: state.character_state(),
            global_summary: state.global_summary(),
            plot_arcs: state.plot_arcs(),
            previous_chapter_summary: &previous_chapter_summary,
            chapter_text,
        })
    }
}
