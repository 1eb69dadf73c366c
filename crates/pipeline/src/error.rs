//! Errors reported by [`run`](crate::run).

use std::io;
use std::path::{Path, PathBuf};

use compress::{CodecError, PumpError};
use thiserror::Error;

use crate::exit_code::ExitCode;
use crate::result::PipelineResult;

/// Failures of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Opening, reading, creating or writing a file failed.
    #[error("failed to {action} '{}': {source}", .path.display())]
    Io {
        /// What was being attempted (`open`, `read`, `create`, `write`, ...).
        action: &'static str,
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The source is not a regular file.
    #[error("'{}' is not a regular file", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },
    /// The destination exists and overwriting was not requested.
    #[error("'{}' already exists; refusing to overwrite", .path.display())]
    DestinationExists {
        /// Existing destination.
        path: PathBuf,
    },
    /// Source and destination name the same file.
    #[error("refusing to write '{}' onto itself", .path.display())]
    SameFile {
        /// Path used for both sides.
        path: PathBuf,
    },
    /// The frame header could not be parsed; no output was produced.
    #[error("'{}': malformed zstd frame: {reason}", .path.display())]
    MalformedFrame {
        /// Compressed input.
        path: PathBuf,
        /// Description of the header problem.
        reason: &'static str,
    },
    /// The compressed stream ended before its frame was complete.
    #[error("'{}': {source}", .path.display())]
    TruncatedStream {
        /// Compressed input.
        path: PathBuf,
        /// Codec report with the produced and declared sizes.
        #[source]
        source: CodecError,
    },
    /// The codec rejected the data or its parameters.
    #[error("'{}': {source}", .path.display())]
    Codec {
        /// File whose stream was being processed.
        path: PathBuf,
        /// Codec failure.
        #[source]
        source: CodecError,
    },
    /// Digests differ. The output file has been left in place.
    #[error("verification failed for '{}': output does not match the reference digest", .0.destination.display())]
    VerificationMismatch(Box<PipelineResult>),
}

impl PipelineError {
    /// Maps the error to the process exit code.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io { source, .. } => ExitCode::from_io_error(source),
            Self::NotAFile { .. } | Self::DestinationExists { .. } | Self::SameFile { .. } => {
                ExitCode::FileSelect
            }
            Self::MalformedFrame { .. } => ExitCode::MalformedFrame,
            Self::TruncatedStream { .. } => ExitCode::Truncated,
            Self::Codec { source, .. } => match source {
                CodecError::Parameter { source, .. }
                    if source.kind() == io::ErrorKind::Unsupported =>
                {
                    ExitCode::Unsupported
                }
                CodecError::UseAfterClose | CodecError::FinishInProgress => ExitCode::Internal,
                _ => ExitCode::Codec,
            },
            Self::VerificationMismatch(_) => ExitCode::VerificationMismatch,
        }
    }

    /// Returns the run result carried by a verification mismatch.
    #[must_use]
    pub fn result(&self) -> Option<&PipelineResult> {
        match self {
            Self::VerificationMismatch(result) => Some(result.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Classifies a codec failure on the stream read from or written to `path`.
    pub(crate) fn codec(path: &Path, source: CodecError) -> Self {
        let path = path.to_path_buf();
        match source {
            CodecError::MalformedFrame { reason } => Self::MalformedFrame { path, reason },
            source @ CodecError::Truncated { .. } => Self::TruncatedStream { path, source },
            source => Self::Codec { path, source },
        }
    }

    /// Attributes a pump failure to the source, the destination, or the
    /// stream identified by `stream`.
    pub(crate) fn from_pump(error: PumpError, source: &Path, destination: &Path, stream: &Path) -> Self {
        match error {
            PumpError::Read(err) => Self::io("read", source, err),
            PumpError::Write(err) => Self::io("write", destination, err),
            PumpError::Codec(err) => Self::codec(stream, err),
        }
    }
}
