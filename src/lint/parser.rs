//! Lint log discovery and parsing.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use regex::Regex;

use super::error::LintError;
use super::finding::{LintFinding, Severity};

/// Super-Linter log locations checked in order. Relative entries resolve
/// against the workspace root.
pub const DEFAULT_LOG_CANDIDATES: [&str; 3] = [
    "/github/workspace/super-linter.log",
    "super-linter.log",
    "/tmp/lint/super-linter.log",
];

const FINDING_PATTERN: &str = r"(?P<file>.+?):(?P<line>\d+):(?P<column>\d+):\s*(?P<severity>error|warning):\s*(?P<message>.+)";

/// Compiled `path:line:column: severity: message` pattern.
#[derive(Debug, Clone)]
pub struct FindingPattern {
    regex: Regex,
}

impl FindingPattern {
    /// Compiles the finding pattern.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Pattern`] if the regex fails to compile.
    pub fn compile() -> Result<Self, LintError> {
        let regex = Regex::new(FINDING_PATTERN).map_err(|error| LintError::Pattern {
            message: error.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Extracts findings from log text in match order.
    ///
    /// Separators around the severity may hold any amount of whitespace and
    /// the path and message are trimmed, so indented and CRLF logs parse.
    /// Matches whose line or column is zero, or does not fit in a `u32`, are
    /// dropped.
    #[must_use]
    pub fn findings(&self, text: &str) -> Vec<LintFinding> {
        self.regex
            .captures_iter(text)
            .filter_map(|captures| {
                let line = positive(captures.name("line")?.as_str())?;
                let column = positive(captures.name("column")?.as_str())?;
                let severity = Severity::from_word(captures.name("severity")?.as_str())?;
                Some(LintFinding {
                    file: captures.name("file")?.as_str().trim().to_owned(),
                    line,
                    column,
                    severity,
                    message: captures.name("message")?.as_str().trim().to_owned(),
                })
            })
            .collect()
    }
}

fn positive(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|value| *value > 0)
}

/// Scans the candidate log files for a workspace.
#[derive(Debug, Clone)]
pub struct LogParser {
    root: Utf8PathBuf,
    candidates: Vec<Utf8PathBuf>,
    pattern: FindingPattern,
}

impl LogParser {
    /// Creates a parser over [`DEFAULT_LOG_CANDIDATES`].
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Pattern`] if the finding pattern fails to compile.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Result<Self, LintError> {
        Self::with_candidates(
            root,
            DEFAULT_LOG_CANDIDATES.iter().map(Utf8PathBuf::from).collect(),
        )
    }

    /// Creates a parser over an explicit candidate list.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Pattern`] if the finding pattern fails to compile.
    pub fn with_candidates(
        root: impl Into<Utf8PathBuf>,
        candidates: Vec<Utf8PathBuf>,
    ) -> Result<Self, LintError> {
        Ok(Self {
            root: root.into(),
            candidates,
            pattern: FindingPattern::compile()?,
        })
    }

    /// Candidate paths in scan order.
    #[must_use]
    pub fn candidates(&self) -> &[Utf8PathBuf] {
        &self.candidates
    }

    /// Reads every existing candidate and concatenates its findings.
    ///
    /// Missing files contribute nothing. A file that exists but cannot be
    /// read is logged and skipped.
    #[must_use]
    pub fn scan(&self) -> Vec<LintFinding> {
        let mut findings = Vec::new();
        for candidate in &self.candidates {
            let location = self.root.join(candidate);
            match read_candidate(&location) {
                Ok(Some(text)) => {
                    let found = self.pattern.findings(&text);
                    tracing::debug!(log = %location, count = found.len(), "scanned lint log");
                    findings.extend(found);
                }
                Ok(None) => tracing::debug!(log = %location, "lint log not present"),
                Err(error) => {
                    tracing::warn!(log = %location, "failed to read lint log: {error}");
                }
            }
        }
        findings
    }
}

/// Reads a log through its parent directory. `Utf8Path::join` keeps absolute
/// candidates as they are.
fn read_candidate(location: &Utf8Path) -> io::Result<Option<String>> {
    let parent = location
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let Some(file_name) = location.file_name() else {
        return Ok(None);
    };

    let text = Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name));
    match text {
        Ok(text) => Ok(Some(text)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use camino::{Utf8Path, Utf8PathBuf};
    use cap_std::ambient_authority;
    use cap_std::fs_utf8::Dir;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::{DEFAULT_LOG_CANDIDATES, FindingPattern, LogParser};
    use crate::lint::{LintFinding, Severity};

    struct Workspace {
        _temp: TempDir,
        root: Utf8PathBuf,
        dir: Dir,
    }

    impl Workspace {
        fn write(&self, path: &str, contents: &str) {
            if let Some(parent) = Utf8Path::new(path).parent().filter(|p| !p.as_str().is_empty()) {
                self.dir.create_dir_all(parent).expect("create log directory");
            }
            self.dir.write(path, contents).expect("write log file");
        }

        fn parser(&self, candidates: &[&str]) -> LogParser {
            LogParser::with_candidates(
                self.root.clone(),
                candidates.iter().map(Utf8PathBuf::from).collect(),
            )
            .expect("parser")
        }
    }

    #[fixture]
    fn workspace() -> Workspace {
        let temp = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .expect("temp path should be UTF-8");
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("open temp dir");
        Workspace {
            _temp: temp,
            root,
            dir,
        }
    }

    #[fixture]
    fn pattern() -> FindingPattern {
        FindingPattern::compile().expect("pattern should compile")
    }

    #[rstest]
    fn parses_single_error(pattern: FindingPattern) {
        let findings = pattern.findings("./a.js:10:5: error: Expected semicolon\n");

        assert_eq!(
            findings,
            vec![LintFinding {
                file: "./a.js".to_owned(),
                line: 10,
                column: 5,
                severity: Severity::Error,
                message: "Expected semicolon".to_owned(),
            }]
        );
    }

    #[rstest]
    #[case::no_spaces("./a.js:10:5:error:Expected semicolon")]
    #[case::wide_spaces("./a.js:10:5:  error:  Expected semicolon")]
    #[case::indented("  ./a.js:10:5: error: Expected semicolon")]
    #[case::tab_indented("\t./a.js:10:5: error: Expected semicolon")]
    #[case::trailing_spaces("./a.js:10:5: error: Expected semicolon   ")]
    fn separator_whitespace_is_flexible(pattern: FindingPattern, #[case] text: &str) {
        let findings = pattern.findings(text);

        assert_eq!(findings.len(), 1, "text: {text:?}");
        let finding = findings.first().expect("one finding");
        assert_eq!(finding.file, "./a.js");
        assert_eq!(finding.normalised_path(), "a.js");
        assert_eq!((finding.line, finding.column), (10, 5));
        assert_eq!(finding.message, "Expected semicolon");
    }

    #[rstest]
    fn ignores_lines_that_do_not_match(pattern: FindingPattern) {
        let text = "\
> eslint .
src/a.js:3:1: warning: Unexpected console statement
some other noise
src/b.js:7:12: Error: capitalised severity is not matched
src/b.js:8:2: info: unknown severity
src/c.js:1:1: error: Missing return type

2 problems
";

        let findings = pattern.findings(text);

        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings.iter().map(|f| f.file.as_str()).collect::<Vec<_>>(),
            ["src/a.js", "src/c.js"]
        );
        assert_eq!(findings.first().map(|f| f.severity), Some(Severity::Warning));
    }

    #[rstest]
    fn prefixed_lines_keep_the_whole_prefix_as_path(pattern: FindingPattern) {
        let findings = pattern.findings("C:/repo/a.js:4:2: warning: drive letters\n");

        assert_eq!(
            findings.first().map(|f| f.file.as_str()),
            Some("C:/repo/a.js")
        );
    }

    #[rstest]
    #[case::zero_line("a.js:0:4: error: bad")]
    #[case::zero_column("a.js:4:0: error: bad")]
    #[case::line_overflow("a.js:99999999999:4: error: bad")]
    fn zero_or_oversized_positions_are_dropped(pattern: FindingPattern, #[case] text: &str) {
        assert!(pattern.findings(text).is_empty());
    }

    #[rstest]
    fn crlf_logs_are_supported(pattern: FindingPattern) {
        let findings = pattern.findings("a.js:1:2: error: one\r\nb.js:3:4: warning: two\r\n");

        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings.iter().map(|f| f.message.as_str()).collect::<Vec<_>>(),
            ["one", "two"]
        );
        assert_eq!(
            findings.iter().map(|f| f.file.as_str()).collect::<Vec<_>>(),
            ["a.js", "b.js"]
        );
    }

    #[rstest]
    fn empty_text_yields_no_findings(pattern: FindingPattern) {
        assert!(pattern.findings("").is_empty());
    }

    #[rstest]
    fn scan_reads_super_linter_log_in_workspace(workspace: Workspace) {
        workspace.write("super-linter.log", "./a.js:10:5: error: Expected semicolon\n");

        let findings = workspace.parser(&["super-linter.log"]).scan();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings.first().map(|f| f.line), Some(10));
    }

    #[rstest]
    fn scan_reads_absolute_candidates(workspace: Workspace) {
        let elsewhere = TempDir::new().expect("second temp dir");
        let elsewhere_root = Utf8PathBuf::from_path_buf(elsewhere.path().to_path_buf())
            .expect("temp path should be UTF-8");
        Dir::open_ambient_dir(&elsewhere_root, ambient_authority())
            .expect("open second temp dir")
            .write("super-linter.log", "abs.js:2:3: warning: outside workspace\n")
            .expect("write absolute log");
        let absolute = elsewhere_root.join("super-linter.log");

        let findings = workspace.parser(&[absolute.as_str()]).scan();

        assert_eq!(findings.first().map(|f| f.file.as_str()), Some("abs.js"));
    }

    #[rstest]
    fn scan_concatenates_candidates_in_order(workspace: Workspace) {
        workspace.write("reports/lint.log", "z.js:1:1: warning: last\n");
        workspace.write("super-linter.log", "a.js:1:1: error: first\n");
        workspace.write("tmp/super-linter.log", "m.js:2:2: error: middle\n");

        let parser = workspace.parser(&["super-linter.log", "tmp/super-linter.log", "reports/lint.log"]);
        let files: Vec<String> = parser.scan().into_iter().map(|f| f.file).collect();

        assert_eq!(files, ["a.js", "m.js", "z.js"]);
    }

    #[rstest]
    fn scan_skips_missing_candidates(workspace: Workspace) {
        workspace.write("super-linter.log", "b.js:4:2: warning: only one\n");

        let parser = workspace.parser(&["absent.log", "missing/dir/lint.log", "super-linter.log"]);

        assert_eq!(parser.scan().len(), 1);
    }

    #[rstest]
    fn scan_keeps_duplicates_across_files(workspace: Workspace) {
        let line = "dup.js:5:5: error: same\n";
        workspace.write("first.log", line);
        workspace.write("second.log", line);

        assert_eq!(workspace.parser(&["first.log", "second.log"]).scan().len(), 2);
    }

    #[rstest]
    fn unreadable_candidate_is_isolated(workspace: Workspace) {
        workspace
            .dir
            .create_dir("broken.log")
            .expect("directory standing in for a log");
        workspace.write("super-linter.log", "ok.js:1:1: error: still parsed\n");

        let findings = workspace.parser(&["broken.log", "super-linter.log"]).scan();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings.first().map(|f| f.file.as_str()), Some("ok.js"));
    }

    #[rstest]
    fn missing_workspace_yields_no_findings(workspace: Workspace) {
        let parser = LogParser::with_candidates(
            workspace.root.join("absent"),
            vec![Utf8PathBuf::from("super-linter.log")],
        )
        .expect("parser");

        assert!(parser.scan().is_empty());
    }

    #[test]
    fn default_candidates_are_the_super_linter_locations() {
        let parser = LogParser::new(".").expect("parser");

        assert_eq!(
            parser
                .candidates()
                .iter()
                .map(|candidate| candidate.as_str())
                .collect::<Vec<_>>(),
            DEFAULT_LOG_CANDIDATES
        );
        assert_eq!(
            DEFAULT_LOG_CANDIDATES,
            [
                "/github/workspace/super-linter.log",
                "super-linter.log",
                "/tmp/lint/super-linter.log",
            ]
        );
    }
}
