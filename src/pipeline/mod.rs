//! Runs the selected pipeline from a loaded configuration.
//!
//! Both pipelines follow the same shape: compute locally, render the
//! payloads, then hand them to a [`Destination`](context::Destination),
//! which either prints them (dry run), posts them to GitHub, or drops them
//! when the run has no pull request context. Only failures that make the
//! run meaningless surface as [`PipelineError`]; everything downstream of a
//! successful computation is logged and reported through [`RunReport`].

mod context;
mod estimate;
mod lint;

use std::io::Write;

use thiserror::Error;

use crate::changes::ChangeCollectionError;
use crate::config::{ConfigError, OperationMode, StewardConfig};
use crate::lint::LintError;

pub use context::{Destination, PublishStatus};
pub use estimate::run_estimate;
pub use lint::run_lint;

/// Errors that end the run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configuration cannot drive any pipeline.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The diff between base and head could not be computed.
    #[error("failed to collect changes: {0}")]
    Changes(#[from] ChangeCollectionError),

    /// The lint parser could not be prepared.
    #[error(transparent)]
    Lint(#[from] LintError),

    /// The async runtime for publishing could not start.
    #[error("failed to start async runtime: {message}")]
    Runtime {
        /// Runtime builder detail.
        message: String,
    },

    /// Dry-run output could not be written.
    #[error("failed to write output: {message}")]
    Output {
        /// I/O error detail.
        message: String,
    },
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Pipeline that ran.
    pub mode: OperationMode,
    /// Outcome of the publishing step.
    pub publish: PublishStatus,
}

/// Runs the pipeline named by `config`, writing dry-run output to `out`.
///
/// # Errors
///
/// Returns [`PipelineError`] for configuration problems, change-collection
/// failures, and other conditions that warrant a non-zero exit.
pub fn run(config: &StewardConfig, out: &mut dyn Write) -> Result<RunReport, PipelineError> {
    let mode = config.operation_mode()?;
    tracing::info!(?mode, dry_run = config.dry_run, "starting pipeline");

    let publish = match mode {
        OperationMode::Estimate => run_estimate(config, out)?,
        OperationMode::Lint => run_lint(config, out)?,
    };

    tracing::info!(?mode, ?publish, "pipeline finished");
    Ok(RunReport { mode, publish })
}

fn build_runtime() -> Result<tokio::runtime::Runtime, PipelineError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| PipelineError::Runtime {
            message: error.to_string(),
        })
}

fn write_output(out: &mut dyn Write, text: &str) -> Result<(), PipelineError> {
    writeln!(out, "{text}").map_err(|error| PipelineError::Output {
        message: error.to_string(),
    })
}
