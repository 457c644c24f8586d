//! GitHub pull request publishing.
//!
//! This module wraps Octocrab to post issue comments and inline reviews on
//! the pull request that triggered the workflow. The target pull request is
//! resolved from the repository slug and the event payload file; when either
//! is unavailable, callers treat publishing as skipped rather than failed.

pub mod error;
pub mod event;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::PublishError;
pub use event::read_pull_request_number;
pub use gateway::{CommentGateway, DEFAULT_API_BASE, GatewayTimeouts, OctocrabCommentGateway};
pub use locator::{
    PersonalAccessToken, PullRequestNumber, PullRequestTarget, RepositoryName, RepositoryOwner,
    RepositorySlug,
};
pub use models::{InlineComment, IssueCommentPayload, ReviewDraft, ReviewEvent};

#[cfg(test)]
pub use gateway::MockCommentGateway;
