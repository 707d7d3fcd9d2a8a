//! Log subscriber setup.
//!
//! Library spans and events go to stderr. `RUST_LOG` takes precedence over
//! the level derived from `-v`/`-q`.

use crate::config::CliConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter for `config`, honouring `RUST_LOG` when set
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_directive()))
}

/// Install the global subscriber
///
/// A second call is a no-op.
pub fn init_logging(config: &CliConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(config.verbosity.is_debug());

    // Err only when a subscriber is already installed
    let _ = if config.log_json {
        builder.json().try_init()
    } else {
        builder.with_ansi(config.use_color()).try_init()
    };
}
