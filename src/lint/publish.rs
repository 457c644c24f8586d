//! Publishing a lint report to the pull request.

use crate::github::{CommentGateway, PublishError, PullRequestTarget};

use super::review::LintReport;

/// What happened to the review half of a lint publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDelivery {
    /// No findings, so no review was sent.
    Skipped,
    /// The review was accepted.
    Submitted,
    /// The review request failed.
    Failed(PublishError),
}

impl ReviewDelivery {
    /// Returns true unless the review request failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Result of both publish calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintPublication {
    /// Review outcome.
    pub review: ReviewDelivery,
    /// Summary comment outcome.
    pub summary: Result<(), PublishError>,
}

/// Sends the review (when there is one) and then the summary comment.
///
/// The summary is attempted whatever happened to the review. Failures are
/// logged and returned, never propagated.
pub async fn publish_lint_report(
    gateway: &dyn CommentGateway,
    target: &PullRequestTarget,
    report: &LintReport,
) -> LintPublication {
    let review = match &report.review {
        None => {
            tracing::info!(%target, "no lint findings; review skipped");
            ReviewDelivery::Skipped
        }
        Some(draft) => match gateway.submit_review(target, draft).await {
            Ok(()) => {
                tracing::info!(%target, comments = draft.comments.len(), "lint review submitted");
                ReviewDelivery::Submitted
            }
            Err(error) => {
                tracing::error!(%target, "lint review failed: {error}");
                ReviewDelivery::Failed(error)
            }
        },
    };

    let summary = gateway.post_issue_comment(target, &report.summary).await;
    match &summary {
        Ok(()) => tracing::info!(%target, "lint summary posted"),
        Err(error) => tracing::error!(%target, "lint summary failed: {error}"),
    }

    LintPublication { review, summary }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use rstest::{fixture, rstest};

    use super::{ReviewDelivery, publish_lint_report};
    use crate::github::{
        MockCommentGateway, PublishError, PullRequestNumber, PullRequestTarget, RepositorySlug,
    };
    use crate::lint::{LintFinding, ReviewComposer, Severity};

    #[fixture]
    fn target() -> PullRequestTarget {
        PullRequestTarget::new(
            RepositorySlug::parse("owner/repo").expect("slug"),
            PullRequestNumber::new(7).expect("number"),
        )
    }

    fn one_error() -> Vec<LintFinding> {
        vec![LintFinding {
            file: "./a.js".to_owned(),
            line: 10,
            column: 5,
            severity: Severity::Error,
            message: "Expected semicolon".to_owned(),
        }]
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime")
    }

    #[rstest]
    fn empty_report_skips_review_but_posts_summary(target: PullRequestTarget) {
        let report = ReviewComposer.compose(&[]);
        let mut gateway = MockCommentGateway::new();
        gateway.expect_submit_review().never();
        gateway
            .expect_post_issue_comment()
            .times(1)
            .withf(|_, body| body.contains("Probleeme ei leitud"))
            .returning(|_, _| Ok(()));

        let publication = runtime().block_on(publish_lint_report(&gateway, &target, &report));

        assert_eq!(publication.review, ReviewDelivery::Skipped);
        assert_eq!(publication.summary, Ok(()));
    }

    #[rstest]
    fn review_is_sent_before_summary(target: PullRequestTarget) {
        let report = ReviewComposer.compose(&one_error());
        let mut sequence = Sequence::new();
        let mut gateway = MockCommentGateway::new();
        gateway
            .expect_submit_review()
            .times(1)
            .in_sequence(&mut sequence)
            .withf(|_, draft| {
                draft
                    .comments
                    .first()
                    .is_some_and(|c| c.path == "a.js" && c.line == 10 && c.body.contains("HARD"))
            })
            .returning(|_, _| Ok(()));
        gateway
            .expect_post_issue_comment()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(()));

        let publication = runtime().block_on(publish_lint_report(&gateway, &target, &report));

        assert_eq!(publication.review, ReviewDelivery::Submitted);
        assert!(publication.summary.is_ok());
    }

    #[rstest]
    fn review_failure_does_not_suppress_summary(target: PullRequestTarget) {
        let report = ReviewComposer.compose(&one_error());
        let mut gateway = MockCommentGateway::new();
        gateway.expect_submit_review().times(1).returning(|_, _| {
            Err(PublishError::Api {
                message: "HTTP 422: Validation Failed".to_owned(),
            })
        });
        gateway
            .expect_post_issue_comment()
            .times(1)
            .returning(|_, _| Ok(()));

        let publication = runtime().block_on(publish_lint_report(&gateway, &target, &report));

        assert!(!publication.review.is_success());
        assert!(publication.summary.is_ok());
    }

    #[rstest]
    fn summary_failure_is_reported_not_raised(target: PullRequestTarget) {
        let report = ReviewComposer.compose(&[]);
        let mut gateway = MockCommentGateway::new();
        gateway.expect_post_issue_comment().returning(|_, _| {
            Err(PublishError::Network {
                message: "connection reset".to_owned(),
            })
        });

        let publication = runtime().block_on(publish_lint_report(&gateway, &target, &report));

        assert!(publication.review.is_success());
        assert!(matches!(publication.summary, Err(PublishError::Network { .. })));
    }
}
