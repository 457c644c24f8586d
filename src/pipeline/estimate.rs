//! Work-hour estimate pipeline.

use std::io::Write;

use crate::changes::{Git2DiffSource, collect_changes};
use crate::config::StewardConfig;
use crate::estimate::{OpenAiEstimationService, estimate_changes, render_estimate_comment};

use super::context::{Destination, PublishStatus};
use super::{PipelineError, build_runtime, write_output};

/// Collects changes, asks for an estimate, and publishes the comment.
///
/// Estimation runs before the async runtime exists because the HTTP client
/// is blocking.
///
/// # Errors
///
/// Returns [`PipelineError::Changes`] when the diff cannot be computed.
pub fn run_estimate(
    config: &StewardConfig,
    out: &mut dyn Write,
) -> Result<PublishStatus, PipelineError> {
    let workspace = config.workspace();
    let source = Git2DiffSource::discover(&workspace)?;
    let changes = collect_changes(&source, &config.base_ref(), &config.head_ref())?;
    tracing::info!(
        base = changes.base_ref(),
        files = changes.file_count(),
        "collected pull request changes"
    );

    let service = OpenAiEstimationService::new(config.estimation_config());
    let outcome = estimate_changes(&service, &changes);
    let body = render_estimate_comment(&outcome, &changes);

    let runtime = build_runtime()?;
    let _entered = runtime.enter();
    match Destination::resolve(config) {
        Destination::DryRun => {
            write_output(out, &body)?;
            Ok(PublishStatus::Printed)
        }
        Destination::Unavailable { reason } => Ok(PublishStatus::for_unavailable(&reason)),
        Destination::GitHub { gateway, target } => {
            match runtime.block_on(gateway.post_issue_comment(&target, &body)) {
                Ok(()) => {
                    tracing::info!(%target, "estimate comment posted");
                    Ok(PublishStatus::Published)
                }
                Err(error) => {
                    tracing::error!(%target, "failed to post estimate comment: {error}");
                    Ok(PublishStatus::Failed)
                }
            }
        }
    }
}
