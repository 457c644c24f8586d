//! Error types for change collection.

use thiserror::Error;

/// Errors that abort change collection.
///
/// Every variant is fatal for the estimate pipeline: a partial change set is
/// never produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChangeCollectionError {
    /// The working directory is not inside a Git repository.
    #[error("repository not available: {message}")]
    RepositoryNotAvailable {
        /// Error detail from git2.
        message: String,
    },

    /// The base reference could not be resolved to a commit.
    #[error("base reference '{reference}' not found (has it been fetched?)")]
    ReferenceNotFound {
        /// The reference as configured.
        reference: String,
    },

    /// `HEAD` does not point at a commit.
    #[error("HEAD is not available: {message}")]
    HeadUnavailable {
        /// Error detail from git2.
        message: String,
    },

    /// Computing or rendering the diff failed.
    #[error("diff failed: {message}")]
    DiffFailed {
        /// Error detail from git2.
        message: String,
    },
}

impl From<git2::Error> for ChangeCollectionError {
    fn from(error: git2::Error) -> Self {
        Self::DiffFailed {
            message: error.message().to_owned(),
        }
    }
}
