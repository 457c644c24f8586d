//! Pull request discovery from the workflow event payload.
//!
//! GitHub Actions writes the triggering webhook payload to the file named by
//! `GITHUB_EVENT_PATH`. Pull request events carry the number under
//! `pull_request.number`; some event shapes only expose a top-level `number`.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;

use super::error::PublishError;
use super::locator::PullRequestNumber;

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<EventPullRequest>,
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    number: Option<u64>,
}

/// Reads the pull request number from an event payload file.
///
/// # Errors
///
/// Returns [`PublishError::EventPayload`] when the file cannot be opened,
/// read, or decoded as JSON, and [`PublishError::MissingPullRequestNumber`]
/// when the payload does not describe a pull request.
pub fn read_pull_request_number(path: &Utf8Path) -> Result<PullRequestNumber, PublishError> {
    let payload_error = |message: String| PublishError::EventPayload {
        path: path.to_string(),
        message,
    };

    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| payload_error("path has no file name".to_owned()))?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| payload_error(error.to_string()))?;
    let content = dir
        .read_to_string(file_name)
        .map_err(|error| payload_error(error.to_string()))?;

    pull_request_number_from_json(&content).map_err(|error| match error {
        PayloadError::Decode(message) => payload_error(message),
        PayloadError::Publish(inner) => inner,
    })
}

enum PayloadError {
    Decode(String),
    Publish(PublishError),
}

fn pull_request_number_from_json(content: &str) -> Result<PullRequestNumber, PayloadError> {
    let payload: EventPayload =
        serde_json::from_str(content).map_err(|error| PayloadError::Decode(error.to_string()))?;

    let number = payload
        .pull_request
        .and_then(|pull_request| pull_request.number)
        .or(payload.number)
        .ok_or(PayloadError::Publish(PublishError::MissingPullRequestNumber))?;

    PullRequestNumber::new(number).map_err(PayloadError::Publish)
}
