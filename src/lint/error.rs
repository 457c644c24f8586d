//! Lint pipeline errors.

use thiserror::Error;

/// Errors raised while preparing the lint parser.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LintError {
    /// The finding pattern did not compile.
    #[error("lint finding pattern is invalid: {message}")]
    Pattern {
        /// Regex compiler detail.
        message: String,
    },
}
