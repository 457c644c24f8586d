//! Where rendered payloads go.

use crate::config::StewardConfig;
use crate::github::{CommentGateway, OctocrabCommentGateway, PublishError, PullRequestTarget};

/// Resolved publishing destination for one run.
pub enum Destination {
    /// Print payloads instead of posting them.
    DryRun,
    /// Post to the given pull request.
    GitHub {
        /// Authenticated gateway.
        gateway: Box<dyn CommentGateway>,
        /// Pull request receiving the comments.
        target: PullRequestTarget,
    },
    /// Nothing can be published; the reason has been logged.
    Unavailable {
        /// Why publishing is impossible.
        reason: PublishError,
    },
}

impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DryRun => f.write_str("DryRun"),
            Self::GitHub { target, .. } => f
                .debug_struct("GitHub")
                .field("target", &target.to_string())
                .finish_non_exhaustive(),
            Self::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

impl Destination {
    /// Resolves the destination from configuration.
    ///
    /// Must be called inside a Tokio runtime context because the Octocrab
    /// client is built here.
    #[must_use]
    pub fn resolve(config: &StewardConfig) -> Self {
        if config.dry_run {
            return Self::DryRun;
        }

        match Self::connect(config) {
            Ok((gateway, target)) => {
                tracing::debug!(%target, "publishing to pull request");
                Self::GitHub {
                    gateway: Box::new(gateway),
                    target,
                }
            }
            Err(reason) => {
                if reason.is_missing_context() {
                    tracing::warn!("no pull request context, skipping publishing: {reason}");
                } else {
                    tracing::error!("cannot publish to GitHub: {reason}");
                }
                Self::Unavailable { reason }
            }
        }
    }

    fn connect(
        config: &StewardConfig,
    ) -> Result<(OctocrabCommentGateway, PullRequestTarget), PublishError> {
        let target = config.resolve_pull_request_target()?;
        let token = config.resolve_token()?;
        let gateway = OctocrabCommentGateway::for_token(
            &token,
            &config.api_base(),
            config.gateway_timeouts(),
        )?;
        Ok((gateway, target))
    }
}

/// Final state of the publishing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStatus {
    /// Every publish call succeeded.
    Published,
    /// Payloads were printed instead of posted.
    Printed,
    /// Publishing was skipped for lack of pull request context.
    Skipped,
    /// At least one publish call failed; details were logged.
    Failed,
}

impl PublishStatus {
    /// Status for a destination that could not be resolved.
    #[must_use]
    pub const fn for_unavailable(reason: &PublishError) -> Self {
        if reason.is_missing_context() {
            Self::Skipped
        } else {
            Self::Failed
        }
    }
}
