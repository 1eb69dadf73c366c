//! Whole-buffer helpers layered on the streaming session and pump.

use zstd::zstd_safe;

use crate::error::PumpError;
use crate::frame::{ContentSize, FrameMetadata};
use crate::level::CompressionLevel;
use crate::pump::{PumpConfig, compress_stream, decompress_stream};
use crate::session::CompressOptions;

/// Upper bound on the compressed size of `len` input bytes in a single frame.
#[must_use]
pub fn compress_bound(len: usize) -> usize {
    zstd_safe::compress_bound(len)
}

/// Compresses `input` into a new [`Vec`].
///
/// The input length is pledged so the frame header declares the content size.
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> Result<Vec<u8>, PumpError> {
    let options = CompressOptions::new(level).pledged_size(Some(input.len() as u64));
    let mut output = Vec::with_capacity(compress_bound(input.len()));
    let mut source = input;
    compress_stream(&mut source, &mut output, &options, PumpConfig::default())?;
    Ok(output)
}

/// Decompresses the zstd stream in `frame` into a new [`Vec`].
pub fn decompress_to_vec(frame: &[u8]) -> Result<Vec<u8>, PumpError> {
    let mut output = Vec::new();
    let mut source = frame;
    decompress_stream(&mut source, &mut output, PumpConfig::default())?;
    Ok(output)
}

/// Reads the content size declared by the header at the start of `frame`.
#[must_use]
pub fn frame_content_size(frame: &[u8]) -> ContentSize {
    FrameMetadata::from_header(frame).content_size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_round_trip() {
        let data = b"one shot helpers share the streaming code path";
        let frame = compress_to_vec(data, CompressionLevel::Default).expect("compress");
        assert!(frame.len() <= compress_bound(data.len()));
        assert_eq!(decompress_to_vec(&frame).expect("decompress"), data);
    }

    #[test]
    fn one_shot_frames_declare_their_size() {
        let data = vec![7_u8; 4096];
        let frame = compress_to_vec(&data, CompressionLevel::Fast).expect("compress");
        assert_eq!(frame_content_size(&frame), ContentSize::Known(4096));
    }

    #[test]
    fn empty_input_round_trips() {
        let frame = compress_to_vec(&[], CompressionLevel::Default).expect("compress");
        assert!(!frame.is_empty());
        assert_eq!(frame_content_size(&frame), ContentSize::Known(0));
        assert!(decompress_to_vec(&frame).expect("decompress").is_empty());
    }

    #[test]
    fn garbage_reports_error_content_size() {
        assert_eq!(frame_content_size(b"garbage!"), ContentSize::Error);
        assert!(decompress_to_vec(b"garbage!").is_err());
    }

    #[test]
    fn bound_grows_with_input() {
        assert!(compress_bound(0) > 0);
        assert!(compress_bound(1 << 20) >= 1 << 20);
    }
}
