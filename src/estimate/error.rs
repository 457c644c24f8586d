//! Errors raised while requesting an estimate.

use thiserror::Error;

/// Reasons an estimate could not be obtained.
///
/// None of these abort the run: [`MissingApiKey`](Self::MissingApiKey) is
/// reported as "unavailable", everything else as "failed".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EstimationError {
    /// No API key was configured for the completion service.
    #[error("AI API key is not configured")]
    MissingApiKey,

    /// The HTTP client could not be built.
    #[error("failed to configure AI HTTP client: {message}")]
    Client {
        /// Builder error detail.
        message: String,
    },

    /// The request failed before a response arrived (including timeouts).
    #[error("AI request transport failed: {message}")]
    Transport {
        /// Transport-level error detail.
        message: String,
    },

    /// The service answered with a non-200 status.
    #[error("AI request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("AI response JSON decoding failed: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// The response held no parseable number.
    #[error("AI response did not contain an hours estimate: {response}")]
    NoEstimate {
        /// Truncated assistant text.
        response: String,
    },
}

impl EstimationError {
    /// Returns true when the estimator is simply not configured.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }
}
