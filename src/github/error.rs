//! Error types exposed by the GitHub publishing layer.

use thiserror::Error;

/// Errors surfaced while resolving pull request context or talking to GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// The authentication token was missing.
    #[error("GitHub token is required")]
    MissingToken,

    /// The repository slug was missing.
    #[error("repository slug is required (owner/name)")]
    MissingRepository,

    /// The repository slug could not be parsed.
    #[error("repository slug must look like owner/name, got `{slug}`")]
    InvalidRepository {
        /// The rejected slug.
        slug: String,
    },

    /// No event payload path was configured.
    #[error("event payload path is not set")]
    MissingEventPayload,

    /// The event payload could not be read or decoded.
    #[error("event payload `{path}` is unusable: {message}")]
    EventPayload {
        /// Path of the payload file.
        path: String,
        /// Reason the payload could not be used.
        message: String,
    },

    /// The event payload does not describe a pull request.
    #[error("event payload carries no pull request number")]
    MissingPullRequestNumber,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The provided URL could not be parsed.
    #[error("GitHub URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub answered with a status other than the expected one.
    #[error("GitHub API error: {message}")]
    Api {
        /// Description of the failure including the status.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The request did not finish within its timeout.
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// Operation that timed out.
        operation: String,
        /// Timeout that elapsed.
        seconds: u64,
    },
}

impl PublishError {
    /// Returns true when the error means "no pull request to publish to"
    /// rather than a failed publish attempt.
    #[must_use]
    pub const fn is_missing_context(&self) -> bool {
        matches!(
            self,
            Self::MissingToken
                | Self::MissingRepository
                | Self::InvalidRepository { .. }
                | Self::MissingEventPayload
                | Self::EventPayload { .. }
                | Self::MissingPullRequestNumber
                | Self::InvalidPullRequestNumber
        )
    }
}
