//! Estimate comment templates.
//!
//! The target project discusses pull requests in Estonian, so the posted
//! comment is written in Estonian.

use std::borrow::Cow;

use crate::changes::ChangeSet;

use super::error::EstimationError;
use super::hours::Hours;
use super::prompt::effort_factor_list;

const HEADING: &str = "## 🤖 AI töömahu hinnang";
const PERSPECTIVE: &str = "*Hinnang on tehtud keskmise arendaja (3-4a kogemust) perspektiivist.*";
const KEY_INSTRUCTIONS: &str =
    "Palun lisa `OPENAI_API_KEY` GitHub'i Settings → Secrets and variables → Actions.";
const LIKELY_CAUSES: &str = "Võimalikud põhjused:\n\
                             - OpenAI API viga\n\
                             - API limiit ületatud\n\
                             - Võrguprobleemid";

/// Terminal result of the estimate stage.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateOutcome {
    /// The model produced a usable number.
    Estimated {
        /// Estimated work hours.
        hours: Hours,
    },
    /// The estimator is not configured for this run.
    Unavailable {
        /// Why no estimate was requested.
        error: EstimationError,
    },
    /// The estimator was configured but did not yield a number.
    Failed {
        /// Why the request produced no estimate.
        error: EstimationError,
    },
}

impl EstimateOutcome {
    /// Classifies an estimation result.
    #[must_use]
    pub fn from_result(result: Result<Hours, EstimationError>) -> Self {
        match result {
            Ok(hours) => Self::Estimated { hours },
            Err(error) if error.is_unavailable() => Self::Unavailable { error },
            Err(error) => Self::Failed { error },
        }
    }
}

/// Renders the pull request comment for an estimate outcome.
#[must_use]
pub fn render_estimate_comment(outcome: &EstimateOutcome, changes: &ChangeSet) -> String {
    let body = match outcome {
        EstimateOutcome::Estimated { hours } => format!(
            "**AI hinnangul võis kuluda: {hours} töötundi**\n\n\
             Muudetud faile: {count}\n\
             Muudatused: {shortstat}\n\n\
             *Hinnang põhineb PR muudatustel ja arvestab:*\n\
             {factors}\n\
             {PERSPECTIVE}",
            count = changes.file_count(),
            shortstat = shortstat_or_dash(changes),
            factors = effort_factor_list(),
        ),
        EstimateOutcome::Unavailable { error } => format!(
            "⚠️ **AI hinnang pole saadaval** - {reason}.\n\n{KEY_INSTRUCTIONS}",
            reason = estonian_reason(error),
        ),
        EstimateOutcome::Failed { error } => format!(
            "⚠️ **AI hinnang ebaõnnestus** - ei saanud hinnangut OpenAI API'st.\n\n\
             Põhjus: {reason}.\n\n\
             {LIKELY_CAUSES}",
            reason = estonian_reason(error),
        ),
    };

    format!("{HEADING}\n\n{body}\n")
}

fn estonian_reason(error: &EstimationError) -> Cow<'static, str> {
    match error {
        EstimationError::MissingApiKey => {
            Cow::Borrowed("OPENAI_API_KEY pole seadistatud GitHub secrets'is")
        }
        EstimationError::Client { .. } => Cow::Borrowed("HTTP-klienti ei õnnestunud seadistada"),
        EstimationError::Transport { .. } => {
            Cow::Borrowed("päring ebaõnnestus võrguvea või aegumise tõttu")
        }
        EstimationError::Status { status, .. } => {
            Cow::Owned(format!("API vastas olekukoodiga {status}"))
        }
        EstimationError::Decode { .. } => Cow::Borrowed("API vastust ei õnnestunud lugeda"),
        EstimationError::NoEstimate { .. } => {
            Cow::Borrowed("vastus ei sisaldanud arvulist hinnangut")
        }
    }
}

fn shortstat_or_dash(changes: &ChangeSet) -> &str {
    let trimmed = changes.shortstat_text().trim();
    if trimmed.is_empty() { "-" } else { trimmed }
}
