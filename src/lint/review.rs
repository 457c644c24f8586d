//! Grouping findings and composing the review and summary payloads.

use crate::github::{InlineComment, ReviewDraft};

use super::finding::{LintFinding, Severity};

/// Findings grouped by normalised file path, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingGroups {
    groups: Vec<(String, Vec<LintFinding>)>,
}

impl FindingGroups {
    /// Groups findings without dropping or reordering entries within a file.
    #[must_use]
    pub fn from_findings(findings: &[LintFinding]) -> Self {
        let mut groups: Vec<(String, Vec<LintFinding>)> = Vec::new();
        for finding in findings {
            let path = finding.normalised_path();
            match groups.iter_mut().find(|(file, _)| file == path) {
                Some((_, entries)) => entries.push(finding.clone()),
                None => groups.push((path.to_owned(), vec![finding.clone()])),
            }
        }
        Self { groups }
    }

    /// Iterates over `(path, findings)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LintFinding])> {
        self.groups
            .iter()
            .map(|(path, findings)| (path.as_str(), findings.as_slice()))
    }

    /// Total number of grouped findings.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.groups.iter().map(|(_, findings)| findings.len()).sum()
    }

    /// Returns true when there are no findings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Everything the lint publisher sends for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintReport {
    /// Review with inline comments; `None` when there are no findings.
    pub review: Option<ReviewDraft>,
    /// Summary comment body.
    pub summary: String,
    /// Number of `error` findings.
    pub error_count: usize,
    /// Number of `warning` findings.
    pub warning_count: usize,
}

/// Builds a [`LintReport`] from parsed findings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewComposer;

impl ReviewComposer {
    /// Composes the review and summary for the given findings.
    #[must_use]
    pub fn compose(self, findings: &[LintFinding]) -> LintReport {
        let groups = FindingGroups::from_findings(findings);
        let error_count = count(findings, Severity::Error);
        let warning_count = count(findings, Severity::Warning);

        let review = (!groups.is_empty()).then(|| {
            let comments = groups
                .iter()
                .flat_map(|(path, entries)| {
                    entries.iter().map(move |finding| InlineComment {
                        path: path.to_owned(),
                        line: finding.line,
                        body: inline_body(finding),
                    })
                })
                .collect::<Vec<_>>();
            ReviewDraft::comment(review_body(comments.len()), comments)
        });

        let summary = if groups.is_empty() {
            success_summary()
        } else {
            counts_summary(&groups, error_count, warning_count)
        };

        LintReport {
            review,
            summary,
            error_count,
            warning_count,
        }
    }
}

fn count(findings: &[LintFinding], severity: Severity) -> usize {
    findings
        .iter()
        .filter(|finding| finding.severity == severity)
        .count()
}

fn inline_body(finding: &LintFinding) -> String {
    format!(
        "{glyph} **{label}** (veerg {column}): {message}",
        glyph = finding.severity.glyph(),
        label = finding.severity.label(),
        column = finding.column,
        message = finding.message,
    )
}

fn review_body(total: usize) -> String {
    format!("🔍 Automaatne lint-ülevaade: {total} leidu.")
}

fn success_summary() -> String {
    "## ✅ Lint-kontroll\n\nProbleeme ei leitud.\n".to_owned()
}

fn counts_summary(groups: &FindingGroups, error_count: usize, warning_count: usize) -> String {
    let rows: String = groups
        .iter()
        .map(|(path, entries)| {
            format!(
                "| `{path}` | {} | {} |\n",
                count(entries, Severity::Error),
                count(entries, Severity::Warning),
            )
        })
        .collect();

    format!(
        "## 🔍 Lint-kontrolli tulemused\n\n\
         - {error}: {error_count}\n\
         - {warning}: {warning_count}\n\n\
         | Fail | {hard} | {medium} |\n|---|---|---|\n{rows}",
        error = Severity::Error,
        warning = Severity::Warning,
        hard = Severity::Error.label(),
        medium = Severity::Warning.label(),
    )
}
