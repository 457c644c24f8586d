//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.prsteward.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRSTEWARD_*`, e.g. `PRSTEWARD_MODE`
//! 4. **Command-line arguments** – `--mode`/`-m`, `--token`/`-t`, ...
//!
//! Values that are still absent after merging fall back to the variables
//! GitHub Actions provides (`GITHUB_TOKEN`, `GITHUB_REPOSITORY`,
//! `GITHUB_EVENT_PATH`, `GITHUB_BASE_REF`, `GITHUB_HEAD_REF`,
//! `GITHUB_API_URL`, `GITHUB_WORKSPACE`) and to `OPENAI_API_KEY`. Blank
//! values count as absent everywhere.
//!
//! # Configuration File
//!
//! ```toml
//! mode = "lint"
//! repository = "octocat/hello-world"
//! base_ref = "develop"
//! ai_model = "gpt-4o-mini"
//! review_timeout_seconds = 45
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::estimate::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, OpenAiEstimationConfig};
use crate::github::{
    DEFAULT_API_BASE, GatewayTimeouts, PersonalAccessToken, PublishError, PullRequestTarget,
    RepositorySlug, read_pull_request_number,
};

const DEFAULT_BASE_REF: &str = "main";
const DEFAULT_HEAD_REF: &str = "HEAD";
const DEFAULT_WORKSPACE: &str = ".";
const DEFAULT_COMMENT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REVIEW_TIMEOUT_SECS: u64 = 30;

/// Pipeline selected for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Estimate work hours and post them as a comment.
    Estimate,
    /// Publish lint findings as a review plus summary.
    Lint,
}

impl OperationMode {
    /// Parses a mode name (`estimate` or `lint`, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownMode`] for any other value.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "estimate" => Ok(Self::Estimate),
            "lint" => Ok(Self::Lint),
            _ => Err(ConfigError::UnknownMode {
                mode: value.to_owned(),
            }),
        }
    }
}

/// Configuration problems that stop the run before any pipeline starts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// ortho-config could not parse arguments or load files.
    #[error("configuration error: {message}")]
    Load {
        /// Loader detail.
        message: String,
    },

    /// No mode was given.
    #[error("operation mode is required (use --mode estimate or --mode lint)")]
    MissingMode,

    /// The mode was not recognised.
    #[error("unknown operation mode `{mode}` (expected `estimate` or `lint`)")]
    UnknownMode {
        /// The rejected value.
        mode: String,
    },
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `PRSTEWARD_MODE` or `--mode`: `estimate` or `lint`
/// - `PRSTEWARD_TOKEN`, `GITHUB_TOKEN`, or `--token`: GitHub token
/// - `PRSTEWARD_REPOSITORY`, `GITHUB_REPOSITORY`, or `--repository`
/// - `PRSTEWARD_AI_API_KEY`, `OPENAI_API_KEY`, or `--ai-api-key`
///
/// Boolean switches (`dry_run`, `json_logs`) are read from the CLI and
/// configuration files only; `ortho_config` does not load booleans from the
/// environment.
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRSTEWARD",
    discovery(
        dotfile_name = ".prsteward.toml",
        config_file_name = "prsteward.toml",
        app_name = "prsteward"
    )
)]
pub struct StewardConfig {
    /// Pipeline to run: `estimate` or `lint`.
    #[ortho_config(cli_short = 'm')]
    pub mode: Option<String>,

    /// GitHub token used to publish comments.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository slug in `owner/name` form.
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Path of the JSON event payload describing the pull request.
    #[ortho_config()]
    pub event_path: Option<String>,

    /// Base reference the pull request targets.
    #[ortho_config(cli_short = 'b')]
    pub base_ref: Option<String>,

    /// Head reference name, used in the estimation prompt.
    #[ortho_config()]
    pub head_ref: Option<String>,

    /// GitHub REST API base URL.
    #[ortho_config()]
    pub api_base: Option<String>,

    /// API key for the chat-completions service.
    #[ortho_config()]
    pub ai_api_key: Option<String>,

    /// Chat-completions base URL.
    #[ortho_config()]
    pub ai_base_url: Option<String>,

    /// Chat model identifier.
    #[ortho_config()]
    pub ai_model: Option<String>,

    /// Estimation request timeout in seconds.
    #[ortho_config()]
    pub ai_timeout_seconds: u64,

    /// Comment request timeout in seconds.
    #[ortho_config()]
    pub comment_timeout_seconds: u64,

    /// Review request timeout in seconds.
    #[ortho_config()]
    pub review_timeout_seconds: u64,

    /// Directory holding the repository and the lint logs.
    #[ortho_config(cli_short = 'w')]
    pub workspace: Option<String>,

    /// Prints comment bodies to stdout instead of posting them.
    #[ortho_config(cli_short = 'n')]
    pub dry_run: bool,

    /// Emits logs as JSON lines.
    #[ortho_config()]
    pub json_logs: bool,
}

impl Default for StewardConfig {
    fn default() -> Self {
        Self {
            mode: None,
            token: None,
            repository: None,
            event_path: None,
            base_ref: None,
            head_ref: None,
            api_base: None,
            ai_api_key: None,
            ai_base_url: None,
            ai_model: None,
            ai_timeout_seconds: DEFAULT_TIMEOUT_SECS,
            comment_timeout_seconds: DEFAULT_COMMENT_TIMEOUT_SECS,
            review_timeout_seconds: DEFAULT_REVIEW_TIMEOUT_SECS,
            workspace: None,
            dry_run: false,
            json_logs: false,
        }
    }
}

impl StewardConfig {
    /// Determines the pipeline to run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingMode`] when no mode is set, or
    /// [`ConfigError::UnknownMode`] when it is not recognised.
    pub fn operation_mode(&self) -> Result<OperationMode, ConfigError> {
        let mode = non_blank(self.mode.as_deref()).ok_or(ConfigError::MissingMode)?;
        OperationMode::parse(&mode)
    }

    /// Resolves the GitHub token, falling back to `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, PublishError> {
        let value = with_env_fallback(self.token.as_deref(), "GITHUB_TOKEN")
            .ok_or(PublishError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Resolves the repository slug, falling back to `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingRepository`] when absent or
    /// [`PublishError::InvalidRepository`] when malformed.
    pub fn resolve_repository(&self) -> Result<RepositorySlug, PublishError> {
        let value = with_env_fallback(self.repository.as_deref(), "GITHUB_REPOSITORY")
            .ok_or(PublishError::MissingRepository)?;
        RepositorySlug::parse(&value)
    }

    /// Resolves the event payload path, falling back to `GITHUB_EVENT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::MissingEventPayload`] when absent.
    pub fn resolve_event_path(&self) -> Result<Utf8PathBuf, PublishError> {
        with_env_fallback(self.event_path.as_deref(), "GITHUB_EVENT_PATH")
            .map(Utf8PathBuf::from)
            .ok_or(PublishError::MissingEventPayload)
    }

    /// Resolves the pull request the run should publish to.
    ///
    /// # Errors
    ///
    /// Returns the first missing-context [`PublishError`] encountered.
    pub fn resolve_pull_request_target(&self) -> Result<PullRequestTarget, PublishError> {
        let repository = self.resolve_repository()?;
        let event_path = self.resolve_event_path()?;
        let number = read_pull_request_number(&event_path)?;
        Ok(PullRequestTarget::new(repository, number))
    }

    /// Base reference, from configuration, `GITHUB_BASE_REF`, or `main`.
    #[must_use]
    pub fn base_ref(&self) -> String {
        with_env_fallback(self.base_ref.as_deref(), "GITHUB_BASE_REF")
            .unwrap_or_else(|| DEFAULT_BASE_REF.to_owned())
    }

    /// Head reference, from configuration, `GITHUB_HEAD_REF`, the branch
    /// named by `GITHUB_REF`, or `HEAD`.
    #[must_use]
    pub fn head_ref(&self) -> String {
        with_env_fallback(self.head_ref.as_deref(), "GITHUB_HEAD_REF")
            .or_else(|| {
                non_blank(env::var("GITHUB_REF").ok().as_deref()).and_then(|reference| {
                    non_blank(Some(
                        reference.strip_prefix("refs/heads/").unwrap_or(&reference),
                    ))
                })
            })
            .unwrap_or_else(|| DEFAULT_HEAD_REF.to_owned())
    }

    /// GitHub API base, from configuration, `GITHUB_API_URL`, or the public
    /// API.
    #[must_use]
    pub fn api_base(&self) -> String {
        with_env_fallback(self.api_base.as_deref(), "GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned())
    }

    /// Workspace root, from configuration, `GITHUB_WORKSPACE`, or `.`.
    #[must_use]
    pub fn workspace(&self) -> Utf8PathBuf {
        with_env_fallback(self.workspace.as_deref(), "GITHUB_WORKSPACE")
            .map_or_else(|| Utf8PathBuf::from(DEFAULT_WORKSPACE), Utf8PathBuf::from)
    }

    /// Builds the estimation client settings.
    #[must_use]
    pub fn estimation_config(&self) -> OpenAiEstimationConfig {
        OpenAiEstimationConfig::new(
            non_blank(self.ai_base_url.as_deref()).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            non_blank(self.ai_model.as_deref()).unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            with_env_fallback(self.ai_api_key.as_deref(), "OPENAI_API_KEY"),
            Duration::from_secs(self.ai_timeout_seconds),
        )
    }

    /// Request timeouts for the GitHub gateway.
    #[must_use]
    pub const fn gateway_timeouts(&self) -> GatewayTimeouts {
        GatewayTimeouts {
            comment: Duration::from_secs(self.comment_timeout_seconds),
            review: Duration::from_secs(self.review_timeout_seconds),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn with_env_fallback(value: Option<&str>, variable: &str) -> Option<String> {
    non_blank(value).or_else(|| non_blank(env::var(variable).ok().as_deref()))
}

#[cfg(test)]
mod tests;
