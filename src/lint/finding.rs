//! Lint finding model and severity taxonomy.

use std::fmt;

/// Severity word reported by the linter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Blocking issue, labelled HARD.
    Error,
    /// Advisory issue, labelled MEDIUM.
    Warning,
}

impl Severity {
    /// Parses the exact, case-sensitive severity word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Review label for this severity.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "HARD",
            Self::Warning => "MEDIUM",
        }
    }

    /// Glyph shown before the label.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Error => "🔴",
            Self::Warning => "⚠️",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph(), self.label())
    }
}

/// One `path:line:column: severity: message` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    /// File path exactly as logged.
    pub file: String,
    /// One-based line number.
    pub line: u32,
    /// One-based column number.
    pub column: u32,
    /// Reported severity.
    pub severity: Severity,
    /// Linter message text.
    pub message: String,
}

impl LintFinding {
    /// Path with a single leading `./` removed.
    #[must_use]
    pub fn normalised_path(&self) -> &str {
        self.file.strip_prefix("./").unwrap_or(&self.file)
    }
}
