//! Request bodies sent to the GitHub REST API.
//!
//! Only the fields the tool actually sends are modelled; GitHub ignores
//! anything it does not recognise, and the tool never reads responses back.

use serde::Serialize;

/// Body of `POST /repos/{owner}/{repo}/issues/{number}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueCommentPayload<'a> {
    /// Markdown comment text.
    pub body: &'a str,
}

/// Review event submitted alongside inline comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewEvent {
    /// Plain annotation; neither approves nor requests changes.
    #[default]
    Comment,
}

/// Single inline comment anchored to a file line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineComment {
    /// Repository-relative file path.
    pub path: String,
    /// Line in the file the comment is attached to.
    pub line: u32,
    /// Markdown comment text.
    pub body: String,
}

/// Body of `POST /repos/{owner}/{repo}/pulls/{number}/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewDraft {
    /// Top-level review text.
    pub body: String,
    /// Review event type.
    pub event: ReviewEvent,
    /// Inline comments submitted with the review.
    pub comments: Vec<InlineComment>,
}

impl ReviewDraft {
    /// Creates a non-blocking `COMMENT` review.
    #[must_use]
    pub fn comment(body: impl Into<String>, comments: Vec<InlineComment>) -> Self {
        Self {
            body: body.into(),
            event: ReviewEvent::Comment,
            comments,
        }
    }
}
