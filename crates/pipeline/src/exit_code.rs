//! Process exit codes reported by zpipe.
//!
//! Every [`PipelineError`](crate::PipelineError) maps onto one [`ExitCode`]
//! through [`PipelineError::exit_code`](crate::PipelineError::exit_code); the
//! command-line front end converts it into [`std::process::ExitCode`].
//!
//! # Examples
//!
//! ```
//! use pipeline::ExitCode;
//!
//! let code = ExitCode::VerificationMismatch;
//! assert_eq!(code.as_i32(), 15);
//! assert_eq!(code.description(), "integrity verification failed");
//! ```

use std::fmt;
use std::io;

/// Exit codes returned by zpipe runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,

    /// Syntax or usage error.
    ///
    /// Returned when command-line arguments are invalid.
    Syntax = 1,

    /// Errors selecting input/output files.
    ///
    /// Returned when the source is missing or unreadable, or the destination
    /// already exists and overwriting was not requested.
    FileSelect = 3,

    /// Requested action not supported by this build.
    ///
    /// Returned, for example, when worker threads are requested from a build
    /// without multithread support.
    Unsupported = 4,

    /// Error in file I/O while streaming.
    FileIo = 11,

    /// The codec rejected the data stream.
    Codec = 12,

    /// The frame header could not be parsed.
    MalformedFrame = 13,

    /// The compressed stream ended before the frame was complete.
    Truncated = 14,

    /// Round-trip or reference digest did not match.
    VerificationMismatch = 15,

    /// A codec session was used outside its contract.
    Internal = 16,
}

impl ExitCode {
    /// Returns the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns a human-readable description of this exit code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Syntax => "syntax or usage error",
            Self::FileSelect => "errors selecting input/output files",
            Self::Unsupported => "requested action not supported",
            Self::FileIo => "error in file IO",
            Self::Codec => "error in compressed data stream",
            Self::MalformedFrame => "malformed frame header",
            Self::Truncated => "compressed stream truncated",
            Self::VerificationMismatch => "integrity verification failed",
            Self::Internal => "internal error",
        }
    }

    /// Maps a `std::io::Error` to an appropriate exit code.
    ///
    /// `NotFound`, `PermissionDenied`, `AlreadyExists` and `IsADirectory`
    /// select [`ExitCode::FileSelect`]; everything else is
    /// [`ExitCode::FileIo`].
    #[must_use]
    pub fn from_io_error(error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::AlreadyExists
            | io::ErrorKind::IsADirectory => Self::FileSelect,
            _ => Self::FileIo,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ExitCode; 10] = [
        ExitCode::Ok,
        ExitCode::Syntax,
        ExitCode::FileSelect,
        ExitCode::Unsupported,
        ExitCode::FileIo,
        ExitCode::Codec,
        ExitCode::MalformedFrame,
        ExitCode::Truncated,
        ExitCode::VerificationMismatch,
        ExitCode::Internal,
    ];

    #[test]
    fn codes_are_distinct_and_fit_a_process_status() {
        let values: Vec<i32> = ALL.iter().map(|code| code.as_i32()).collect();
        assert_eq!(values, [0, 1, 3, 4, 11, 12, 13, 14, 15, 16]);
        assert!(values.iter().all(|value| u8::try_from(*value).is_ok()));
    }

    #[test]
    fn io_errors_map_to_file_codes() {
        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(ExitCode::from_io_error(&missing), ExitCode::FileSelect);
        let full = io::Error::from(io::ErrorKind::StorageFull);
        assert_eq!(ExitCode::from_io_error(&full), ExitCode::FileIo);
    }

    #[test]
    fn display_uses_description() {
        assert_eq!(ExitCode::Truncated.to_string(), "compressed stream truncated");
    }
}
