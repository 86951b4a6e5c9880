//! Global `tracing` subscriber installation.
//!
//! The filter comes from `FABLE_LOG` when set (standard `EnvFilter`
//! directives), otherwise from the configured log level.

use tracing_subscriber::EnvFilter;

use fable_core::config::ObservabilityConfig;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "FABLE_LOG";

/// Filter from `FABLE_LOG`, falling back to `default_directives`.
pub fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Install JSON logging at the default level. Returns false when a global
/// subscriber was already set.
pub fn init_tracing() -> bool {
    init_tracing_with(&ObservabilityConfig::default())
}

pub fn init_tracing_with(config: &ObservabilityConfig) -> bool {
    init_tracing_with_filter(env_filter(&config.log_level), config.json)
}

pub fn init_tracing_with_filter(filter: EnvFilter, json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    let installed = if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    if installed {
        tracing::debug!(json, "tracing initialized");
    }
    installed
}
