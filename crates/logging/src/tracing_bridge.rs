//! crates/logging/src/tracing_bridge.rs
//! Installs the global tracing subscriber used by the zpipe binary.
//!
//! Events go to stderr through a `fmt` layer. The level comes from
//! [`VerbosityConfig`] unless `ZPIPE_LOG` (or, failing that, `RUST_LOG`)
//! carries filter directives, which then take precedence.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "zpipe::pump", "pump started");
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::config::VerbosityConfig;

/// Environment variable holding filter directives specific to zpipe.
pub const LOG_ENV: &str = "ZPIPE_LOG";

/// Picks the filter directives: `ZPIPE_LOG`, then `RUST_LOG`, then the
/// configured verbosity. Blank variables are ignored.
#[must_use]
pub fn filter_directives(
    config: &VerbosityConfig,
    zpipe_log: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    [zpipe_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map_or_else(|| config.verbosity.as_directive().to_owned(), str::to_owned)
}

/// Builds the `EnvFilter` for `config`, falling back to the configured level
/// when the environment directives do not parse.
#[must_use]
pub fn build_filter(config: &VerbosityConfig) -> EnvFilter {
    let zpipe_log = std::env::var(LOG_ENV).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(config, zpipe_log.as_deref(), rust_log.as_deref());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| level_filter(config))
}

/// Filter that admits events up to the configured level and nothing else.
fn level_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(config.level_filter().into())
        .parse_lossy("")
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed, leaving it in
/// place; calling this more than once is harmless.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_targets)
        .without_time();

    tracing_subscriber::registry()
        .with(build_filter(&config))
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Verbosity;

    #[test]
    fn verbosity_is_the_fallback() {
        let config = VerbosityConfig::from_verbose_level(1);
        assert_eq!(filter_directives(&config, None, None), "info");
    }

    #[test]
    fn zpipe_log_wins_over_rust_log() {
        let config = VerbosityConfig::default();
        assert_eq!(
            filter_directives(&config, Some("zpipe::pump=trace"), Some("debug")),
            "zpipe::pump=trace"
        );
    }

    #[test]
    fn rust_log_used_when_zpipe_log_blank() {
        let config = VerbosityConfig::default();
        assert_eq!(filter_directives(&config, Some("  "), Some("debug")), "debug");
    }

    #[test]
    fn quiet_maps_to_error_directive() {
        let config = VerbosityConfig::from_flags(true, 0);
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(filter_directives(&config, None, None), "error");
    }

    #[test]
    fn unparsable_directives_fall_back_to_verbosity_level() {
        let config = VerbosityConfig::from_verbose_level(2);
        assert_eq!(
            level_filter(&config).max_level_hint(),
            Some(tracing::level_filters::LevelFilter::DEBUG)
        );
    }

    #[test]
    fn second_init_is_harmless() {
        let config = VerbosityConfig::default();
        let _ = init_tracing(config);
        assert!(!init_tracing(config));
    }
}
