//! Lint review pipeline.

use std::io::Write;

use crate::config::StewardConfig;
use crate::lint::{LintReport, LogParser, ReviewComposer, publish_lint_report};

use super::context::{Destination, PublishStatus};
use super::{PipelineError, build_runtime, write_output};

/// Scans the lint logs and publishes the review and summary.
///
/// # Errors
///
/// Returns [`PipelineError::Lint`] if the parser cannot be built, or
/// [`PipelineError::Runtime`] / [`PipelineError::Output`] for local
/// failures.
pub fn run_lint(config: &StewardConfig, out: &mut dyn Write) -> Result<PublishStatus, PipelineError> {
    let parser = LogParser::new(config.workspace())?;
    let findings = parser.scan();
    let report = ReviewComposer.compose(&findings);
    tracing::info!(
        errors = report.error_count,
        warnings = report.warning_count,
        "lint logs scanned"
    );

    let runtime = build_runtime()?;
    let _entered = runtime.enter();
    match Destination::resolve(config) {
        Destination::DryRun => {
            print_report(out, &report)?;
            Ok(PublishStatus::Printed)
        }
        Destination::Unavailable { reason } => Ok(PublishStatus::for_unavailable(&reason)),
        Destination::GitHub { gateway, target } => {
            let publication =
                runtime.block_on(publish_lint_report(gateway.as_ref(), &target, &report));
            if publication.review.is_success() && publication.summary.is_ok() {
                Ok(PublishStatus::Published)
            } else {
                Ok(PublishStatus::Failed)
            }
        }
    }
}

fn print_report(out: &mut dyn Write, report: &LintReport) -> Result<(), PipelineError> {
    if let Some(review) = &report.review {
        let json = serde_json::to_string_pretty(review).map_err(|error| PipelineError::Output {
            message: error.to_string(),
        })?;
        write_output(out, &json)?;
    }
    write_output(out, &report.summary)
}
