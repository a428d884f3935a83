//! Near-duplicate paragraph detection.

use crate::{jaccard_similarity, split_paragraphs, truncate_with_ellipsis};
use folio_error::{AuditError, AuditErrorKind, FolioResult};
use serde::{Deserialize, Serialize};

/// Similarity at or above which two paragraphs count as duplicates.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Characters of the paragraph shown in a finding.
pub const EXCERPT_CHARS: usize = 50;

/// Two paragraphs whose word sets overlap past the threshold.
///
/// Indices are 1-based. In the current-chapter scan `matched_index` is
/// always smaller than `paragraph_index`; in the previous-chapter scan it
/// refers to a paragraph of the previous chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct DuplicateFinding {
    /// Paragraph of the current chapter
    paragraph_index: usize,
    /// Paragraph it duplicates
    matched_index: usize,
    /// Jaccard score in `[0, 1]`
    score: f64,
    /// Start of the current-chapter paragraph
    excerpt: String,
}

impl DuplicateFinding {
    /// Create a finding, cutting the excerpt from `paragraph`.
    pub fn new(paragraph_index: usize, matched_index: usize, score: f64, paragraph: &str) -> Self {
        Self {
            paragraph_index,
            matched_index,
            score,
            excerpt: truncate_with_ellipsis(paragraph, EXCERPT_CHARS),
        }
    }
}

/// Pairwise duplicate scanner.
///
/// # Examples
///
/// ```
/// use folio_audit::DuplicateDetector;
///
/// let detector = DuplicateDetector::default();
/// let findings = detector.find_in_chapter("Alice walked home.\n\nAlice walked home.");
///
/// assert_eq!(findings.len(), 1);
/// assert_eq!(*findings[0].paragraph_index(), 2);
/// assert_eq!(*findings[0].matched_index(), 1);
/// assert_eq!(*findings[0].score(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateDetector {
    threshold: f64,
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl DuplicateDetector {
    /// Create a detector with a custom threshold.
    ///
    /// # Errors
    ///
    /// Returns [`AuditErrorKind::InvalidThreshold`] unless `0.0 <= threshold <= 1.0`.
    pub fn new(threshold: f64) -> FolioResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(
                AuditError::new(AuditErrorKind::InvalidThreshold(threshold.to_string())).into(),
            );
        }
        Ok(Self { threshold })
    }

    /// Configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Every pair `(i, j)` with `j < i` scoring at or above the threshold,
    /// ordered by `i` then `j`. Indices are 0-based positions in `paragraphs`.
    fn scan(&self, paragraphs: &[String]) -> Vec<(usize, usize, f64)> {
        let mut pairs = Vec::new();
        for i in 1..paragraphs.len() {
            for j in 0..i {
                let score = jaccard_similarity(&paragraphs[i], &paragraphs[j]);
                if score >= self.threshold {
                    pairs.push((i, j, score));
                }
            }
        }
        pairs
    }

    /// Duplicates within one chapter.
    #[tracing::instrument(skip(self, chapter_text), fields(threshold = self.threshold))]
    pub fn find_in_chapter(&self, chapter_text: &str) -> Vec<DuplicateFinding> {
        let paragraphs = split_paragraphs(chapter_text);
        let findings: Vec<DuplicateFinding> = self
            .scan(&paragraphs)
            .into_iter()
            .map(|(i, j, score)| DuplicateFinding::new(i + 1, j + 1, score, &paragraphs[i]))
            .collect();

        tracing::debug!(
            paragraphs = paragraphs.len(),
            findings = findings.len(),
            "Scanned chapter for duplicates"
        );
        findings
    }

    /// Current-chapter paragraphs that repeat a paragraph of the previous chapter.
    ///
    /// The two chapters are scanned as one text (current first). Only pairs
    /// straddling the boundary are kept: the earlier paragraph lies in the
    /// current chapter and is reported as `paragraph_index`, the later one
    /// lies in the previous chapter and is reported as `matched_index`,
    /// renumbered from 1 within that chapter. Pairs inside one chapter are
    /// left to [`find_in_chapter`](Self::find_in_chapter).
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_audit::DuplicateDetector;
    ///
    /// let detector = DuplicateDetector::default();
    /// let findings = detector.find_against_previous(
    ///     "New dawn.\n\nThe tower fell silent.",
    ///     "The tower fell silent.\n\nOld night.",
    /// );
    ///
    /// assert_eq!(findings.len(), 1);
    /// assert_eq!(*findings[0].paragraph_index(), 2);
    /// assert_eq!(*findings[0].matched_index(), 1);
    /// ```
    #[tracing::instrument(skip(self, chapter_text, previous_text), fields(threshold = self.threshold))]
    pub fn find_against_previous(
        &self,
        chapter_text: &str,
        previous_text: &str,
    ) -> Vec<DuplicateFinding> {
        let current_count = split_paragraphs(chapter_text).len();
        let combined = split_paragraphs(&format!("{}\n\n{}", chapter_text, previous_text));

        let findings: Vec<DuplicateFinding> = self
            .scan(&combined)
            .into_iter()
            .filter(|&(i, j, _)| j < current_count && i >= current_count)
            .map(|(i, j, score)| {
                DuplicateFinding::new(j + 1, i - current_count + 1, score, &combined[j])
            })
            .collect();

        tracing::debug!(
            current_paragraphs = current_count,
            previous_paragraphs = combined.len() - current_count,
            findings = findings.len(),
            "Scanned chapter against previous chapter"
        );
        findings
    }
}
