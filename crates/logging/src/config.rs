//! crates/logging/src/config.rs
//! Verbosity configuration derived from `-q` / `-v` flags.

use std::fmt;

use tracing::level_filters::LevelFilter;

/// Diagnostic level selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Warnings and errors; the default.
    #[default]
    Normal,
    /// Pipeline outcomes (`-v`).
    Info,
    /// Pump phases and session lifecycle (`-vv`).
    Debug,
    /// Per-chunk events (`-vvv` and above).
    Trace,
}

impl Verbosity {
    /// Returns the tracing level filter for this verbosity.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Returns the directive string understood by `EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_directive())
    }
}

/// Verbosity configuration handed to [`init_tracing`](crate::init_tracing).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Selected level.
    pub verbosity: Verbosity,
    /// Include event targets (`zpipe::pump`, ...) in rendered lines.
    pub show_targets: bool,
}

impl VerbosityConfig {
    /// Create a configuration from a `-v` count (0-3+).
    pub fn from_verbose_level(level: u8) -> Self {
        let verbosity = match level {
            0 => Verbosity::Normal,
            1 => Verbosity::Info,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        Self {
            verbosity,
            show_targets: level >= 2,
        }
    }

    /// Create a configuration from the `-q` flag and `-v` count; quiet wins.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            Self {
                verbosity: Verbosity::Quiet,
                show_targets: false,
            }
        } else {
            Self::from_verbose_level(verbose)
        }
    }

    /// Returns the tracing level filter for the configured verbosity.
    #[must_use]
    pub const fn level_filter(&self) -> LevelFilter {
        self.verbosity.level_filter()
    }
}
