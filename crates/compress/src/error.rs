//! Error types surfaced by codec sessions and the stream pump.

use std::io;

use thiserror::Error;

/// Failures reported by a [`CodecSession`](crate::CodecSession).
///
/// Every variant except [`CodecError::UseAfterClose`] and
/// [`CodecError::FinishInProgress`] is terminal: the session closes itself
/// before returning it, so retrying with the same session fails with
/// `UseAfterClose`.
#[derive(Debug, Error)]
pub enum CodecError {
    /// libzstd could not allocate or initialise a context.
    #[error("failed to create zstd {mode} context: {source}")]
    Init {
        /// Direction of the session being created.
        mode: &'static str,
        /// Error reported by libzstd.
        #[source]
        source: io::Error,
    },
    /// libzstd rejected a configuration parameter.
    #[error("zstd rejected parameter {parameter}: {source}")]
    Parameter {
        /// Parameter name as shown in diagnostics.
        parameter: &'static str,
        /// Error reported by libzstd.
        #[source]
        source: io::Error,
    },
    /// libzstd rejected the stream while compressing or decompressing.
    ///
    /// The message of `source` is libzstd's own error name, e.g.
    /// `Data corruption detected` or `Restored data doesn't match checksum`.
    #[error("zstd {operation} failed: {source}")]
    Stream {
        /// Codec operation that failed (`compress`, `decompress`, `flush`).
        operation: &'static str,
        /// Error reported by libzstd.
        #[source]
        source: io::Error,
    },
    /// The codec made no progress although input and output space were available.
    #[error("zstd {operation} made no progress")]
    NoProgress {
        /// Codec operation that stalled.
        operation: &'static str,
    },
    /// Input ended before the frame was complete.
    #[error("{}", truncated_message(.produced, .expected))]
    Truncated {
        /// Number of decompressed bytes produced before the stream ended.
        produced: u64,
        /// Content size declared by the frame header, when present.
        expected: Option<u64>,
    },
    /// The frame header did not allow the declared content size to be determined.
    #[error("malformed zstd frame: {reason}")]
    MalformedFrame {
        /// Description of the header problem.
        reason: &'static str,
    },
    /// `feed` was called after `finish` started flushing the stream.
    #[error("cannot feed a codec session that is already finishing")]
    FinishInProgress,
    /// The session was used after it had been closed.
    #[error("codec session used after close")]
    UseAfterClose,
}

impl CodecError {
    /// Reports whether this error means the stream ended too early.
    #[must_use]
    pub const fn is_truncation(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

fn truncated_message(produced: &u64, expected: &Option<u64>) -> String {
    match expected {
        Some(expected) => format!(
            "compressed stream truncated: produced {produced} of {expected} declared bytes"
        ),
        None => format!(
            "compressed stream truncated: frame incomplete after {produced} decompressed bytes"
        ),
    }
}

/// Failures reported by the [`StreamPump`](crate::StreamPump).
#[derive(Debug, Error)]
pub enum PumpError {
    /// Reading from the source failed.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    /// Writing to the destination failed.
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    /// The codec session failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl PumpError {
    /// Returns the codec error when the failure originated in the session.
    #[must_use]
    pub const fn as_codec(&self) -> Option<&CodecError> {
        match self {
            Self::Codec(error) => Some(error),
            Self::Read(_) | Self::Write(_) => None,
        }
    }
}
