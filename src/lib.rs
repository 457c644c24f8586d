//! Pull request stewardship for CI.
//!
//! The crate provides two pipelines that run inside a pull request workflow:
//!
//! - **estimate**: diff the pull request against its base branch, ask a
//!   chat-completions model for a work-hour estimate, and post it as a
//!   comment.
//! - **lint**: parse linter logs into findings and publish them as one
//!   `COMMENT` review with inline comments, followed by a summary comment.
//!
//! Publishing is best effort: missing pull request context or a failed
//! GitHub call is logged and the run still succeeds. Only an unusable
//! configuration or a failed diff ends the run with an error.

pub mod changes;
pub mod config;
pub mod estimate;
pub mod github;
pub mod lint;
pub mod pipeline;
pub mod telemetry;

pub use config::{ConfigError, OperationMode, StewardConfig};
pub use pipeline::{PipelineError, PublishStatus, RunReport, run};
