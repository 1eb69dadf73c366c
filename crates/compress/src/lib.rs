#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` implements bounded-memory Zstandard streaming for the zpipe
//! workspace. Arbitrarily large inputs move through two fixed-capacity
//! [`Buffer`]s while a single [`CodecSession`] owns the libzstd context that
//! carries compression history between chunks.
//!
//! # Design
//!
//! - [`Buffer`] is the exchange unit between the I/O side and the codec. Its
//!   capacity is fixed at construction and its cursors obey
//!   `consumed <= filled <= capacity`.
//! - [`CodecSession`] wraps the raw streaming operations of the
//!   [`zstd`](https://docs.rs/zstd) crate behind an `Idle → Active →
//!   Finishing → Closed` state machine.
//! - [`StreamPump`] drives read → feed → drain → write and runs the finish
//!   protocol once the source reports end of input.
//! - [`FrameMetadata`] inspects the frame header before decompression so
//!   malformed streams are rejected before any output is produced.
//! - [`compress_to_vec`] and [`decompress_to_vec`] are thin wrappers over the
//!   pump; there is only one codec code path.
//!
//! # Invariants
//!
//! - Pump buffers are allocated once per run and never grow.
//! - Codec errors are terminal: the session releases its context before the
//!   error is returned.
//! - A completed compression stream always carries the frame epilogue; a
//!   decompression run only succeeds when the frame ended cleanly and, when the
//!   header declares a content size, that many bytes were produced.
//!
//! # Errors
//!
//! Session operations return [`CodecError`]; pump runs return [`PumpError`],
//! which separates source read failures and destination write failures from
//! codec failures.
//!
//! # Examples
//!
//! ```
//! use compress::{CompressOptions, CompressionLevel, PumpConfig, compress_stream, decompress_to_vec};
//!
//! # fn main() -> Result<(), compress::PumpError> {
//! let data = b"streaming example payload".repeat(100);
//! let mut frame = Vec::new();
//! let options = CompressOptions::new(CompressionLevel::Fast);
//! let report = compress_stream(&mut data.as_slice(), &mut frame, &options, PumpConfig::with_capacity(512))?;
//! assert_eq!(report.bytes_written, frame.len() as u64);
//!
//! assert_eq!(decompress_to_vec(&frame)?, data);
//! # Ok(())
//! # }
//! ```

mod buffer;
mod common;
mod error;
mod frame;
mod level;
mod oneshot;
mod pump;
mod session;

pub use buffer::{Buffer, DEFAULT_BUFFER_CAPACITY};
pub use error::{CodecError, PumpError};
pub use frame::{ContentSize, FRAME_HEADER_MAX, FrameMetadata};
pub use level::{CompressionLevel, CompressionLevelError, MAX_LEVEL};
pub use oneshot::{compress_bound, compress_to_vec, decompress_to_vec, frame_content_size};
pub use pump::{
    ProbedFrame, PumpConfig, PumpReport, StreamPump, compress_stream, decompress_probed,
    decompress_stream, probe_frame,
};
pub use session::{CodecSession, CompressOptions, Finish, Mode, Progress, SessionState};
