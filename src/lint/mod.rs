//! Lint log to pull request review pipeline.
//!
//! [`LogParser`] reads the well-known lint logs, [`ReviewComposer`] turns the
//! findings into a `COMMENT` review plus a summary, and
//! [`publish_lint_report`] sends both.

mod error;
mod finding;
mod parser;
mod publish;
mod review;

pub use error::LintError;
pub use finding::{LintFinding, Severity};
pub use parser::{DEFAULT_LOG_CANDIDATES, FindingPattern, LogParser};
pub use publish::{LintPublication, ReviewDelivery, publish_lint_report};
pub use review::{FindingGroups, LintReport, ReviewComposer};
