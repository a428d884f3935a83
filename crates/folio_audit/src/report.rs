//! Consistency report assembly.

use crate::DuplicateFinding;
use std::fmt;

/// Whole report when the reviewer model produced nothing.
pub const EMPTY_CRITIQUE_PLACEHOLDER: &str = "reviewer agent produced no response";

const CURRENT_HEADING: &str = "[Duplicate paragraphs in this chapter]";
const PREVIOUS_HEADING: &str = "[Duplicate paragraphs against the previous chapter]";
const PLOT_ARCS_HEADING: &str = "[New plot threads / unresolved conflicts]";

/// Outcome of the previous-chapter comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossChapterCheck {
    /// First chapter, or the previous chapter was not available.
    Skipped,
    /// Comparison ran; findings may be empty.
    Checked(Vec<DuplicateFinding>),
}

/// Everything one audit found, rendered in a fixed section order.
///
/// # Examples
///
/// ```
/// use folio_audit::{ConsistencyReport, CrossChapterCheck};
///
/// let report = ConsistencyReport::new("Looks fine.", vec![], CrossChapterCheck::Skipped, vec![]);
/// let text = report.to_string();
///
/// assert!(text.starts_with("Looks fine."));
/// assert!(text.contains("no obvious duplicate paragraphs"));
/// assert!(text.contains("skipped"));
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ConsistencyReport {
    critique: String,
    current_duplicates: Vec<DuplicateFinding>,
    cross_chapter: CrossChapterCheck,
    new_plot_arcs: Vec<String>,
}

impl ConsistencyReport {
    /// Assemble a report.
    pub fn new(
        critique: impl Into<String>,
        current_duplicates: Vec<DuplicateFinding>,
        cross_chapter: CrossChapterCheck,
        new_plot_arcs: Vec<String>,
    ) -> Self {
        Self {
            critique: critique.into(),
            current_duplicates,
            cross_chapter,
            new_plot_arcs,
        }
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.critique)?;

        if self.current_duplicates.is_empty() {
            write!(
                f,
                "\n\n{}: no obvious duplicate paragraphs found.",
                CURRENT_HEADING
            )?;
        } else {
            write!(f, "\n\n{}:\n", CURRENT_HEADING)?;
            for d in &self.current_duplicates {
                writeln!(
                    f,
                    "- Paragraph {} duplicates paragraph {} (similarity: {:.2}), excerpt: {}",
                    d.paragraph_index(),
                    d.matched_index(),
                    d.score(),
                    d.excerpt()
                )?;
            }
        }

        match &self.cross_chapter {
            CrossChapterCheck::Skipped => write!(
                f,
                "\n\n{}: skipped (first chapter or previous chapter not found).",
                PREVIOUS_HEADING
            )?,
            CrossChapterCheck::Checked(findings) if findings.is_empty() => write!(
                f,
                "\n\n{}: no obvious duplicates of the previous chapter found.",
                PREVIOUS_HEADING
            )?,
            CrossChapterCheck::Checked(findings) => {
                write!(f, "\n\n{}:\n", PREVIOUS_HEADING)?;
                for d in findings {
                    writeln!(
                        f,
                        "- Paragraph {} duplicates previous chapter paragraph {} (similarity: {:.2}), excerpt: {}",
                        d.paragraph_index(),
                        d.matched_index(),
                        d.score(),
                        d.excerpt()
                    )?;
                }
            }
        }

        if !self.new_plot_arcs.is_empty() {
            write!(f, "\n\n{}:\n", PLOT_ARCS_HEADING)?;
            for arc in &self.new_plot_arcs {
                writeln!(f, "- {}", arc)?;
            }
        }

        Ok(())
    }
}

/// Result of a consistency audit.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditOutcome {
    /// The reviewer returned nothing; no checks ran and nothing was stored.
    NoResponse,
    /// Full report.
    Report(ConsistencyReport),
}

impl AuditOutcome {
    /// The report, if the audit produced one.
    pub fn report(&self) -> Option<&ConsistencyReport> {
        match self {
            AuditOutcome::NoResponse => None,
            AuditOutcome::Report(report) => Some(report),
        }
    }
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::NoResponse => f.write_str(EMPTY_CRITIQUE_PLACEHOLDER),
            AuditOutcome::Report(report) => report.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_in_fixed_order() {
        let report = ConsistencyReport::new(
            "CRITIQUE",
            vec![DuplicateFinding::new(2, 1, 1.0, "Alice walked home.")],
            CrossChapterCheck::Checked(vec![DuplicateFinding::new(1, 3, 0.9, "Rain.")]),
            vec!["scroll".to_string(), "storm".to_string()],
        );
        let text = report.to_string();

        let critique = text.find("CRITIQUE").unwrap();
        let current = text.find(CURRENT_HEADING).unwrap();
        let previous = text.find(PREVIOUS_HEADING).unwrap();
        let arcs = text.find(PLOT_ARCS_HEADING).unwrap();
        assert!(critique < current && current < previous && previous < arcs);

        assert!(text.contains(
            "- Paragraph 2 duplicates paragraph 1 (similarity: 1.00), excerpt: Alice walked home.\n"
        ));
        assert!(text.contains(
            "- Paragraph 1 duplicates previous chapter paragraph 3 (similarity: 0.90), excerpt: Rain.\n"
        ));
        assert!(text.ends_with("- scroll\n- storm\n"));
    }

    #[test]
    fn test_plot_arc_section_only_when_present() {
        let text = ConsistencyReport::new(
            "ok",
            vec![],
            CrossChapterCheck::Checked(vec![]),
            vec![],
        )
        .to_string();
        assert!(!text.contains(PLOT_ARCS_HEADING));
        assert!(text.contains("no obvious duplicates of the previous chapter"));
    }

    #[test]
    fn test_no_response_renders_placeholder_only() {
        assert_eq!(AuditOutcome::NoResponse.to_string(), EMPTY_CRITIQUE_PLACEHOLDER);
        assert!(AuditOutcome::NoResponse.report().is_none());
    }
}
