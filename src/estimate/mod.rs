//! Work-hour estimation for pull requests.
//!
//! The estimate stage turns a [`ChangeSet`](crate::changes::ChangeSet) into a
//! prompt, asks a chat-completions service for a number of hours, and reduces
//! the reply to an [`EstimateOutcome`] that always renders to a comment. A
//! missing API key or a failed request is a normal outcome, not an error
//! that aborts the run.

mod comment;
mod error;
mod hours;
mod openai;
mod prompt;

pub use comment::{EstimateOutcome, render_estimate_comment};
pub use error::EstimationError;
pub use hours::{Hours, parse_hours};
pub use openai::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, OpenAiEstimationConfig,
    OpenAiEstimationService,
};
pub use prompt::{MAX_LISTED_FILES, build_prompt, summarise_files};

use crate::changes::ChangeSet;

/// Service capable of estimating work hours for a change set.
#[cfg_attr(test, mockall::automock)]
pub trait EstimationService {
    /// Requests an hours estimate.
    ///
    /// # Errors
    ///
    /// Returns [`EstimationError`] when no estimate could be obtained.
    fn estimate(&self, changes: &ChangeSet) -> Result<Hours, EstimationError>;
}

/// Runs the estimator once and classifies the result, logging failures.
pub fn estimate_changes(service: &dyn EstimationService, changes: &ChangeSet) -> EstimateOutcome {
    let outcome = EstimateOutcome::from_result(service.estimate(changes));

    match &outcome {
        EstimateOutcome::Estimated { hours } => {
            tracing::info!(hours = hours.get(), "work-hour estimate obtained");
        }
        EstimateOutcome::Unavailable { error } => {
            tracing::warn!("work-hour estimate unavailable: {error}");
        }
        EstimateOutcome::Failed { error } => {
            tracing::warn!("work-hour estimate failed: {error}");
        }
    }

    outcome
}
