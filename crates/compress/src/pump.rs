//! The read → feed → drain → write loop that moves a stream through a
//! [`CodecSession`].
//!
//! The pump owns one input and one output [`Buffer`]; both are allocated when
//! the pump is created and reused for every chunk, so memory use is bounded by
//! the configured capacities plus whatever the codec context itself holds,
//! independent of the stream length.
//!
//! Failures abort immediately. The destination is left holding whatever had
//! been written before the failure and must not be treated as a valid stream.

use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::buffer::{Buffer, DEFAULT_BUFFER_CAPACITY};
use crate::common::CountingWriter;
use crate::error::PumpError;
use crate::frame::{FRAME_HEADER_MAX, FrameMetadata};
use crate::session::{CodecSession, CompressOptions};

/// Buffer capacities used by a [`StreamPump`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PumpConfig {
    /// Capacity of the buffer filled from the source.
    pub input_capacity: usize,
    /// Capacity of the buffer the codec writes into.
    pub output_capacity: usize,
}

impl PumpConfig {
    /// Uses `capacity` for both buffers.
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            input_capacity: capacity,
            output_capacity: capacity,
        }
    }
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }
}

/// Byte counts observed by one pump run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PumpReport {
    /// Bytes read from the source.
    pub bytes_read: u64,
    /// Bytes written to the destination.
    pub bytes_written: u64,
}

/// Drives a single source/destination pair through a codec session.
#[derive(Debug)]
pub struct StreamPump {
    input: Buffer,
    output: Buffer,
}

impl StreamPump {
    /// Allocates the input and output buffers described by `config`.
    #[must_use]
    pub fn new(config: PumpConfig) -> Self {
        Self {
            input: Buffer::with_capacity(config.input_capacity),
            output: Buffer::with_capacity(config.output_capacity),
        }
    }

    /// Streams `source` through `session` into `destination`.
    ///
    /// The session is consumed; its codec context is released on every exit
    /// path. The destination is flushed before a successful return.
    pub fn run<R, W>(
        mut self,
        source: &mut R,
        destination: &mut W,
        mut session: CodecSession,
    ) -> Result<PumpReport, PumpError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mode = session.mode();
        let mut sink = CountingWriter::new(destination);
        let mut bytes_read = 0_u64;

        debug!(
            target: "zpipe::pump",
            %mode,
            input_capacity = self.input.capacity(),
            output_capacity = self.output.capacity(),
            "pump started"
        );

        loop {
            let read = self
                .input
                .fill_from(source, usize::MAX)
                .map_err(PumpError::Read)?;
            if read == 0 {
                break;
            }
            bytes_read += read as u64;
            trace!(target: "zpipe::pump", read, "chunk read");

            while self.input.remaining() > 0 {
                session.feed(&mut self.input, &mut self.output)?;
                drain(&mut self.output, &mut sink)?;
            }
        }

        debug!(target: "zpipe::pump", %mode, bytes_read, "end of input, finishing stream");
        let mut rounds = 0_u32;
        loop {
            let finish = session.finish(&mut self.output)?;
            drain(&mut self.output, &mut sink)?;
            rounds += 1;
            if finish.done {
                break;
            }
        }
        sink.flush().map_err(PumpError::Write)?;

        let report = PumpReport {
            bytes_read,
            bytes_written: sink.bytes(),
        };
        debug!(
            target: "zpipe::pump",
            %mode,
            bytes_read = report.bytes_read,
            bytes_written = report.bytes_written,
            finish_rounds = rounds,
            "pump finished"
        );
        Ok(report)
    }
}

fn drain<W>(output: &mut Buffer, sink: &mut W) -> Result<(), PumpError>
where
    W: Write + ?Sized,
{
    if !output.is_empty() {
        sink.write_all(output.filled_bytes())
            .map_err(PumpError::Write)?;
    }
    output.reset();
    Ok(())
}

/// Compresses `source` into `destination` as a single zstd frame.
pub fn compress_stream<R, W>(
    source: &mut R,
    destination: &mut W,
    options: &CompressOptions,
    config: PumpConfig,
) -> Result<PumpReport, PumpError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let session = CodecSession::compressor(options)?;
    StreamPump::new(config).run(source, destination, session)
}

/// A validated frame header read ahead of the decompression pump.
///
/// The bytes consumed while probing are held here and replayed in front of
/// the remaining source by [`decompress_probed`].
#[derive(Clone, Copy, Debug)]
pub struct ProbedFrame {
    metadata: FrameMetadata,
    header: [u8; FRAME_HEADER_MAX],
    peeked: usize,
}

impl ProbedFrame {
    /// Metadata parsed from the header.
    #[must_use]
    pub const fn metadata(&self) -> FrameMetadata {
        self.metadata
    }
}

/// Reads and validates the frame header at the start of `source`.
///
/// A header whose content size cannot be determined fails with
/// [`CodecError::MalformedFrame`](crate::CodecError::MalformedFrame).
pub fn probe_frame<R>(source: &mut R) -> Result<ProbedFrame, PumpError>
where
    R: Read + ?Sized,
{
    let mut header = [0_u8; FRAME_HEADER_MAX];
    let (metadata, peeked) = FrameMetadata::probe(source, &mut header).map_err(PumpError::Read)?;
    let metadata = metadata.validate()?;
    debug!(
        target: "zpipe::pump",
        content_size = ?metadata.content_size(),
        peeked,
        "frame header inspected"
    );
    Ok(ProbedFrame {
        metadata,
        header,
        peeked,
    })
}

/// Decompresses a stream whose header was already read by [`probe_frame`].
///
/// `source` must be positioned right after the probed bytes. When the header
/// declares a size, the run fails with a truncation error if fewer bytes are
/// produced.
pub fn decompress_probed<R, W>(
    probed: &ProbedFrame,
    source: &mut R,
    destination: &mut W,
    config: PumpConfig,
) -> Result<PumpReport, PumpError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let session =
        CodecSession::decompressor()?.with_expected_size(probed.metadata.declared_size());
    let mut replay = (&probed.header[..probed.peeked]).chain(source);
    StreamPump::new(config).run(&mut replay, destination, session)
}

/// Decompresses the zstd stream in `source` into `destination`.
///
/// The frame header is inspected first; a header whose content size cannot be
/// determined fails with [`CodecError::MalformedFrame`](crate::CodecError::MalformedFrame)
/// before any pump buffer is allocated.
pub fn decompress_stream<R, W>(
    source: &mut R,
    destination: &mut W,
    config: PumpConfig,
) -> Result<(FrameMetadata, PumpReport), PumpError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let probed = probe_frame(source)?;
    let report = decompress_probed(&probed, source, destination, config)?;
    Ok((probed.metadata, report))
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::error::CodecError;

    #[test]
    fn compress_then_decompress_small_buffers() {
        let data = b"pump pump pump pump pump pump".repeat(50);
        let mut frame = Vec::new();
        let report = compress_stream(
            &mut data.as_slice(),
            &mut frame,
            &CompressOptions::default(),
            PumpConfig::with_capacity(7),
        )
        .expect("compress");
        assert_eq!(report.bytes_read, data.len() as u64);
        assert_eq!(report.bytes_written, frame.len() as u64);

        let mut restored = Vec::new();
        let (_, report) =
            decompress_stream(&mut frame.as_slice(), &mut restored, PumpConfig::with_capacity(3))
                .expect("decompress");
        assert_eq!(restored, data);
        assert_eq!(report.bytes_read, frame.len() as u64);
        assert_eq!(report.bytes_written, data.len() as u64);
    }

    #[test]
    fn pledged_size_is_declared_in_header() {
        let data = b"declared".repeat(20);
        let options = CompressOptions::default().pledged_size(Some(data.len() as u64));
        let mut frame = Vec::new();
        compress_stream(&mut data.as_slice(), &mut frame, &options, PumpConfig::default())
            .expect("compress");

        let mut restored = Vec::new();
        let (metadata, _) =
            decompress_stream(&mut frame.as_slice(), &mut restored, PumpConfig::default())
                .expect("decompress");
        assert_eq!(metadata.declared_size(), Some(data.len() as u64));
        assert_eq!(restored, data);
    }

    #[test]
    fn probed_header_is_replayed_into_the_pump() {
        let data = b"probe then pump ".repeat(64);
        let options = CompressOptions::default().pledged_size(Some(data.len() as u64));
        let mut frame = Vec::new();
        compress_stream(&mut data.as_slice(), &mut frame, &options, PumpConfig::default())
            .expect("compress");

        let mut source = frame.as_slice();
        let probed = probe_frame(&mut source).expect("probe");
        assert_eq!(probed.metadata().declared_size(), Some(data.len() as u64));
        assert!(source.len() < frame.len());

        let mut restored = Vec::new();
        let report =
            decompress_probed(&probed, &mut source, &mut restored, PumpConfig::with_capacity(5))
                .expect("decompress");
        assert_eq!(restored, data);
        assert_eq!(report.bytes_read, frame.len() as u64);
    }

    #[test]
    fn probe_rejects_plain_text() {
        let err = probe_frame(&mut &b"plain text"[..]).unwrap_err();
        assert!(matches!(
            err.as_codec(),
            Some(CodecError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn malformed_header_fails_before_output() {
        let mut restored = Vec::new();
        let err = decompress_stream(&mut &b"plain text"[..], &mut restored, PumpConfig::default())
            .unwrap_err();
        assert!(matches!(
            err.as_codec(),
            Some(CodecError::MalformedFrame { .. })
        ));
        assert!(restored.is_empty());
    }

    #[test]
    fn empty_source_is_malformed_for_decompression() {
        let mut restored = Vec::new();
        let err =
            decompress_stream(&mut io::empty(), &mut restored, PumpConfig::default()).unwrap_err();
        assert!(matches!(
            err.as_codec(),
            Some(CodecError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn write_failure_aborts_the_pump() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::StorageFull, "no space left"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = compress_stream(
            &mut &b"anything"[..],
            &mut Full,
            &CompressOptions::default(),
            PumpConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PumpError::Write(_)));
    }

    #[test]
    fn read_failure_aborts_the_pump() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("device gone"))
            }
        }

        let mut frame = Vec::new();
        let err = compress_stream(
            &mut Failing,
            &mut frame,
            &CompressOptions::default(),
            PumpConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PumpError::Read(_)));
    }
}
