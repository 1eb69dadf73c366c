//! Stateful Zstandard contexts driven through fixed-size [`Buffer`]s.
//!
//! A [`CodecSession`] owns exactly one libzstd compression or decompression
//! context together with every byte of window/history memory that context
//! allocates. The session moves through four states:
//!
//! ```text
//! Idle --feed--> Active --finish--> Finishing --done/close/error--> Closed
//!   \------------------finish-------------^
//! ```
//!
//! # Invariants
//!
//! - The session is neither `Clone` nor `Copy`; ownership can only move, so a
//!   context is never released twice.
//! - Codec errors are terminal. The context is released before the error is
//!   returned and any later call reports [`CodecError::UseAfterClose`].
//! - [`CodecSession::finish`] closes the session once it reports `done`.
//! - Compression parameters are only accepted by [`CodecSession::compressor`];
//!   decompression sessions take no codec parameters.

use std::fmt;
use std::io;

use tracing::debug;
use zstd::stream::raw::{CParameter, Decoder, Encoder, InBuffer, Operation, OutBuffer};

use crate::buffer::Buffer;
use crate::error::CodecError;
use crate::level::CompressionLevel;

/// Direction of a codec session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Raw bytes in, zstd frame out.
    Compress,
    /// zstd frame in, raw bytes out.
    Decompress,
}

impl Mode {
    /// Returns the lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Compress => "compress",
            Self::Decompress => "decompress",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle state of a [`CodecSession`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SessionState {
    /// Configured but not fed yet.
    Idle,
    /// At least one `feed` call has been made.
    Active,
    /// `finish` has been called at least once and has not reported `done`.
    Finishing,
    /// Codec memory has been released.
    Closed,
}

/// Codec parameters applied when a compression session starts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompressOptions {
    /// Compression level.
    pub level: CompressionLevel,
    /// Worker threads used inside libzstd; `0` keeps compression on the calling thread.
    pub workers: u32,
    /// Append a content checksum to the frame epilogue.
    pub checksum: bool,
    /// Total input length, when known up front. The frame header then
    /// declares the content size and libzstd rejects input of any other length.
    pub pledged_size: Option<u64>,
}

impl CompressOptions {
    /// Returns options with the given level and defaults elsewhere.
    #[must_use]
    pub fn new(level: CompressionLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Sets the number of libzstd worker threads.
    pub fn workers(mut self, workers: u32) -> Self {
        self.workers = workers;
        self
    }

    /// Enables or disables the frame content checksum.
    pub fn checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    /// Declares the exact number of bytes that will be fed.
    pub fn pledged_size(mut self, size: Option<u64>) -> Self {
        self.pledged_size = size;
        self
    }
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            level: CompressionLevel::Default,
            workers: 0,
            checksum: true,
            pledged_size: None,
        }
    }
}

/// Bytes moved by one [`CodecSession::feed`] call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Progress {
    /// Bytes taken from the input buffer.
    pub consumed: usize,
    /// Bytes appended to the output buffer.
    pub produced: usize,
}

/// Outcome of one [`CodecSession::finish`] call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Finish {
    /// Bytes appended to the output buffer.
    pub produced: usize,
    /// `true` once the stream has been completely flushed.
    pub done: bool,
}

enum Engine {
    Compress(Encoder<'static>),
    Decompress(Decoder<'static>),
}

struct Step {
    consumed: usize,
    filled: usize,
    hint: usize,
}

/// One libzstd streaming context plus the bookkeeping needed to drive it.
pub struct CodecSession {
    mode: Mode,
    state: SessionState,
    engine: Option<Engine>,
    frame_complete: bool,
    expected_size: Option<u64>,
    total_in: u64,
    total_out: u64,
}

impl CodecSession {
    /// Creates a compression session configured with `options`.
    pub fn compressor(options: &CompressOptions) -> Result<Self, CodecError> {
        let mut encoder = Encoder::new(options.level.as_i32()).map_err(|source| {
            CodecError::Init {
                mode: Mode::Compress.name(),
                source,
            }
        })?;

        set_parameter(&mut encoder, "checksum", CParameter::ChecksumFlag(options.checksum))?;
        apply_workers(&mut encoder, options.workers)?;
        if options.pledged_size.is_some() {
            encoder
                .set_pledged_src_size(options.pledged_size)
                .map_err(|source| CodecError::Parameter {
                    parameter: "pledged_size",
                    source,
                })?;
        }

        debug!(
            target: "zpipe::session",
            level = options.level.as_i32(),
            workers = options.workers,
            checksum = options.checksum,
            pledged = ?options.pledged_size,
            "compression session created"
        );
        Ok(Self::with_engine(Mode::Compress, Engine::Compress(encoder)))
    }

    /// Creates a decompression session.
    pub fn decompressor() -> Result<Self, CodecError> {
        let decoder = Decoder::new().map_err(|source| CodecError::Init {
            mode: Mode::Decompress.name(),
            source,
        })?;
        debug!(target: "zpipe::session", "decompression session created");
        Ok(Self::with_engine(Mode::Decompress, Engine::Decompress(decoder)))
    }

    /// Records the content size declared by the frame header.
    ///
    /// [`finish`](Self::finish) reports [`CodecError::Truncated`] if fewer bytes
    /// were produced. Ignored by compression sessions.
    pub fn with_expected_size(mut self, size: Option<u64>) -> Self {
        if self.mode == Mode::Decompress {
            self.expected_size = size;
        }
        self
    }

    fn with_engine(mode: Mode, engine: Engine) -> Self {
        Self {
            mode,
            state: SessionState::Idle,
            engine: Some(engine),
            frame_complete: false,
            expected_size: None,
            total_in: 0,
            total_out: 0,
        }
    }

    /// Returns the session direction.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the total number of bytes consumed from input buffers.
    #[must_use]
    pub const fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Returns the total number of bytes produced into output buffers.
    #[must_use]
    pub const fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Reports whether the decoder has seen the end of the last frame it started.
    #[must_use]
    pub const fn frame_complete(&self) -> bool {
        self.frame_complete
    }

    /// Consumes bytes from `input` and appends whatever the codec produces to `output`.
    ///
    /// A single call may stop before `input` is exhausted when `output` runs
    /// out of space; callers drain `output` and call again with the same
    /// `input` until [`Buffer::remaining`] reaches zero.
    pub fn feed(&mut self, input: &mut Buffer, output: &mut Buffer) -> Result<Progress, CodecError> {
        match self.state {
            SessionState::Closed => return Err(CodecError::UseAfterClose),
            SessionState::Finishing => return Err(CodecError::FinishInProgress),
            SessionState::Idle => self.state = SessionState::Active,
            SessionState::Active => {}
        }

        let operation = self.mode.name();
        let before = output.filled();
        let Some(engine) = self.engine.as_mut() else {
            return Err(CodecError::UseAfterClose);
        };
        let step = match run_engine(engine, input.unconsumed(), output) {
            Ok(step) => step,
            Err(source) => return Err(self.fail(CodecError::Stream { operation, source })),
        };

        input.consume(step.consumed);
        output.set_filled(step.filled);
        let progress = Progress {
            consumed: step.consumed,
            produced: step.filled - before,
        };
        self.total_in += progress.consumed as u64;
        self.total_out += progress.produced as u64;
        if self.mode == Mode::Decompress {
            self.frame_complete = step.hint == 0;
        }

        if progress == Progress::default()
            && input.remaining() > 0
            && output.spare_capacity() > 0
        {
            return Err(self.fail(CodecError::NoProgress { operation }));
        }
        Ok(progress)
    }

    /// Flushes buffered codec state into `output`.
    ///
    /// Compression sessions write the remaining block data and the frame
    /// epilogue; callers repeat until [`Finish::done`] is `true`, draining
    /// `output` between calls. Decompression sessions flush any decoded bytes
    /// still held by libzstd and then confirm the frame ended cleanly.
    pub fn finish(&mut self, output: &mut Buffer) -> Result<Finish, CodecError> {
        if self.state == SessionState::Closed {
            return Err(CodecError::UseAfterClose);
        }
        self.state = SessionState::Finishing;
        if output.spare_capacity() == 0 {
            return Ok(Finish::default());
        }

        let before = output.filled();
        let Some(engine) = self.engine.as_mut() else {
            return Err(CodecError::UseAfterClose);
        };
        let result = match engine {
            Engine::Compress(encoder) => end_stream(encoder, output),
            Engine::Decompress(decoder) if !self.frame_complete => {
                run_engine_decoder(decoder, output)
            }
            Engine::Decompress(_) => Ok(Step {
                consumed: 0,
                filled: before,
                hint: 0,
            }),
        };
        let step = match result {
            Ok(step) => step,
            Err(source) => {
                return Err(self.fail(CodecError::Stream {
                    operation: "flush",
                    source,
                }));
            }
        };

        output.set_filled(step.filled);
        let produced = step.filled - before;
        self.total_out += produced as u64;

        let done = match self.mode {
            Mode::Compress => {
                if step.hint > 0 && produced == 0 {
                    return Err(self.fail(CodecError::NoProgress { operation: "flush" }));
                }
                step.hint == 0
            }
            Mode::Decompress => {
                self.frame_complete = step.hint == 0;
                if self.frame_complete {
                    if let Some(expected) = self.expected_size.filter(|&e| self.total_out < e) {
                        return Err(self.fail(CodecError::Truncated {
                            produced: self.total_out,
                            expected: Some(expected),
                        }));
                    }
                    true
                } else if produced == 0 {
                    return Err(self.fail(CodecError::Truncated {
                        produced: self.total_out,
                        expected: self.expected_size,
                    }));
                } else {
                    false
                }
            }
        };

        if done {
            debug!(
                target: "zpipe::session",
                mode = %self.mode,
                total_in = self.total_in,
                total_out = self.total_out,
                "stream finished"
            );
            self.close();
        }
        Ok(Finish { produced, done })
    }

    /// Releases the codec context. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.engine.take().is_some() {
            debug!(target: "zpipe::session", mode = %self.mode, "codec context released");
        }
        self.state = SessionState::Closed;
    }

    fn fail(&mut self, error: CodecError) -> CodecError {
        debug!(target: "zpipe::session", mode = %self.mode, %error, "codec session failed");
        self.close();
        error
    }
}

impl fmt::Debug for CodecSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecSession")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("frame_complete", &self.frame_complete)
            .field("expected_size", &self.expected_size)
            .field("total_in", &self.total_in)
            .field("total_out", &self.total_out)
            .finish_non_exhaustive()
    }
}

fn run_engine(engine: &mut Engine, input: &[u8], output: &mut Buffer) -> io::Result<Step> {
    let (storage, pos) = output.output_parts();
    let mut src = InBuffer::around(input);
    let mut dst = OutBuffer::around_pos(storage, pos);
    let hint = match engine {
        Engine::Compress(encoder) => encoder.run(&mut src, &mut dst)?,
        Engine::Decompress(decoder) => decoder.run(&mut src, &mut dst)?,
    };
    Ok(Step {
        consumed: src.pos(),
        filled: dst.pos(),
        hint,
    })
}

fn run_engine_decoder(decoder: &mut Decoder<'static>, output: &mut Buffer) -> io::Result<Step> {
    let (storage, pos) = output.output_parts();
    let mut src = InBuffer::around(&[]);
    let mut dst = OutBuffer::around_pos(storage, pos);
    let hint = decoder.run(&mut src, &mut dst)?;
    Ok(Step {
        consumed: 0,
        filled: dst.pos(),
        hint,
    })
}

fn end_stream(encoder: &mut Encoder<'static>, output: &mut Buffer) -> io::Result<Step> {
    let (storage, pos) = output.output_parts();
    let mut dst = OutBuffer::around_pos(storage, pos);
    let remaining = encoder.finish(&mut dst, true)?;
    Ok(Step {
        consumed: 0,
        filled: dst.pos(),
        hint: remaining,
    })
}

fn set_parameter(
    encoder: &mut Encoder<'static>,
    parameter: &'static str,
    value: CParameter,
) -> Result<(), CodecError> {
    encoder
        .set_parameter(value)
        .map_err(|source| CodecError::Parameter { parameter, source })
}

#[cfg(feature = "multithread")]
fn apply_workers(encoder: &mut Encoder<'static>, workers: u32) -> Result<(), CodecError> {
    if workers == 0 {
        return Ok(());
    }
    set_parameter(encoder, "workers", CParameter::NbWorkers(workers))
}

#[cfg(not(feature = "multithread"))]
fn apply_workers(_encoder: &mut Encoder<'static>, workers: u32) -> Result<(), CodecError> {
    if workers == 0 {
        return Ok(());
    }
    Err(CodecError::Parameter {
        parameter: "workers",
        source: io::Error::new(
            io::ErrorKind::Unsupported,
            "built without multithread support",
        ),
    })
}
