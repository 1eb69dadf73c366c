//! Compression level selection for Zstandard sessions.

use std::{fmt, num::NonZeroU8, str::FromStr};

/// Highest level accepted by [`CompressionLevel::from_numeric`].
pub const MAX_LEVEL: u32 = 22;

/// Compression levels recognised by the zstd encoder.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub enum CompressionLevel {
    /// Favour speed over compression ratio (level 1).
    Fast,
    /// Balanced speed and ratio (level 3).
    #[default]
    Default,
    /// Favour ratio over speed (level 19).
    Best,
    /// An explicit zstd level in the range `1..=22`.
    Precise(NonZeroU8),
}

impl CompressionLevel {
    /// Creates a [`CompressionLevel::Precise`] value from an explicit numeric level.
    ///
    /// Zstandard accepts levels `1..=22`; anything else is rejected with a
    /// [`CompressionLevelError`].
    pub fn from_numeric(level: u32) -> Result<Self, CompressionLevelError> {
        u8::try_from(level)
            .ok()
            .filter(|_| (1..=MAX_LEVEL).contains(&level))
            .and_then(NonZeroU8::new)
            .map(Self::Precise)
            .ok_or(CompressionLevelError::OutOfRange(level))
    }

    /// Returns the numeric level handed to libzstd.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Fast => 1,
            Self::Default => 3,
            Self::Best => 19,
            Self::Precise(value) => i32::from(value.get()),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

impl FromStr for CompressionLevel {
    type Err = CompressionLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "default" => Ok(Self::Default),
            "best" => Ok(Self::Best),
            other => other
                .parse::<u32>()
                .map_err(|_| CompressionLevelError::Unrecognized(s.trim().to_owned()))
                .and_then(Self::from_numeric),
        }
    }
}

/// Error returned for a compression level zstd does not accept.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CompressionLevelError {
    /// A numeric level outside `1..=22`.
    #[error("compression level {0} is outside the supported range 1-22")]
    OutOfRange(u32),
    /// Text that is neither a number nor a level name.
    #[error("'{0}' is not a compression level (use 1-22, fast, default or best)")]
    Unrecognized(String),
}

impl CompressionLevelError {
    /// Returns the rejected numeric level, if the input was a number.
    #[must_use]
    pub const fn level(&self) -> Option<u32> {
        match self {
            Self::OutOfRange(level) => Some(*level),
            Self::Unrecognized(_) => None,
        }
    }
}
