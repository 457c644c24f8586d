//! Gateway for publishing comments and reviews through Octocrab.
//!
//! The trait keeps the pipelines testable with mocks while the Octocrab
//! implementation performs the raw HTTP requests. Raw requests are used so
//! the exact success status (201 for comments, 200 for reviews) can be
//! checked; any other status is a publish failure.

mod client;
mod error_mapping;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::Octocrab;
use serde::Serialize;

use super::error::PublishError;
use super::locator::{PersonalAccessToken, PullRequestTarget};
use super::models::{IssueCommentPayload, ReviewDraft};

use client::build_octocrab_client;
use error_mapping::{extract_github_message, map_http_error, map_octocrab_error};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const DEFAULT_COMMENT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REVIEW_TIMEOUT_SECS: u64 = 30;

/// Gateway that can post pull request comments and reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// Posts a general (issue) comment on the pull request.
    async fn post_issue_comment(
        &self,
        target: &PullRequestTarget,
        body: &str,
    ) -> Result<(), PublishError>;

    /// Submits a review carrying inline comments in a single request.
    async fn submit_review(
        &self,
        target: &PullRequestTarget,
        review: &ReviewDraft,
    ) -> Result<(), PublishError>;
}

/// Request timeouts applied by [`OctocrabCommentGateway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayTimeouts {
    /// Timeout for posting an issue comment.
    pub comment: Duration,
    /// Timeout for submitting a review.
    pub review: Duration,
}

impl Default for GatewayTimeouts {
    fn default() -> Self {
        Self {
            comment: Duration::from_secs(DEFAULT_COMMENT_TIMEOUT_SECS),
            review: Duration::from_secs(DEFAULT_REVIEW_TIMEOUT_SECS),
        }
    }
}

/// Octocrab-backed gateway.
pub struct OctocrabCommentGateway {
    client: Octocrab,
    timeouts: GatewayTimeouts,
}

impl OctocrabCommentGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab, timeouts: GatewayTimeouts) -> Self {
        Self { client, timeouts }
    }

    /// Builds an authenticated gateway for the given API base URL.
    ///
    /// Must be called from within a Tokio runtime context.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::InvalidUrl` when the base URI cannot be parsed or
    /// `PublishError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        api_base: &str,
        timeouts: GatewayTimeouts,
    ) -> Result<Self, PublishError> {
        let client = build_octocrab_client(token, api_base)?;
        Ok(Self::new(client, timeouts))
    }

    async fn post_expecting<P: Serialize + Sync>(
        &self,
        operation: &str,
        path: String,
        payload: &P,
        expected: StatusCode,
        timeout: Duration,
    ) -> Result<(), PublishError> {
        let uri: Uri = path
            .parse::<Uri>()
            .map_err(|error| PublishError::InvalidUrl(error.to_string()))?;

        let response = with_timeout(operation, timeout, self.client._post(uri, Some(payload)))
            .await?
            .map_err(|error| map_octocrab_error(operation, &error))?;

        let status = response.status();
        if status == expected {
            return Ok(());
        }

        let body = with_timeout(operation, timeout, self.client.body_to_string(response))
            .await?
            .unwrap_or_default();
        Err(map_http_error(
            operation,
            status,
            extract_github_message(&body),
        ))
    }
}

async fn with_timeout<F: Future>(
    operation: &str,
    timeout: Duration,
    future: F,
) -> Result<F::Output, PublishError> {
    tokio::time::timeout(timeout, future)
        .await
        .map_err(|_| PublishError::Timeout {
            operation: operation.to_owned(),
            seconds: timeout.as_secs(),
        })
}

#[async_trait]
impl CommentGateway for OctocrabCommentGateway {
    async fn post_issue_comment(
        &self,
        target: &PullRequestTarget,
        body: &str,
    ) -> Result<(), PublishError> {
        self.post_expecting(
            "post comment",
            target.comments_path(),
            &IssueCommentPayload { body },
            StatusCode::CREATED,
            self.timeouts.comment,
        )
        .await
    }

    async fn submit_review(
        &self,
        target: &PullRequestTarget,
        review: &ReviewDraft,
    ) -> Result<(), PublishError> {
        self.post_expecting(
            "submit review",
            target.reviews_path(),
            review,
            StatusCode::OK,
            self.timeouts.review,
        )
        .await
    }
}
