//! Tracing initialisation.
//!
//! Logs go to stderr so stdout stays free for dry-run output. `RUST_LOG`
//! overrides the default `info` filter.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber, as JSON lines when `json` is set.
///
/// Only the first call in a process takes effect.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer().with_writer(io::stderr).with_target(false);

    let installed = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::init_tracing;

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_tracing(false);
        init_tracing(true);
        tracing::info!("still logging");
    }
}
