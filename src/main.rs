//! prsteward CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use prsteward::{ConfigError, PipelineError, StewardConfig, run, telemetry};

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(error) => return report_failure(&PipelineError::from(error)),
    };
    telemetry::init_tracing(config.json_logs);

    let mut stdout = io::stdout().lock();
    match run(&config, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => report_failure(&error),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] when ortho-config fails to parse arguments
/// or load configuration files.
fn load_config() -> Result<StewardConfig, ConfigError> {
    StewardConfig::load().map_err(|error| ConfigError::Load {
        message: error.to_string(),
    })
}

fn report_failure(error: &PipelineError) -> ExitCode {
    // The exit status reports the failure even if stderr is closed.
    drop(writeln!(io::stderr().lock(), "{error}"));
    ExitCode::FAILURE
}
