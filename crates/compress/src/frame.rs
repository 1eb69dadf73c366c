//! Frame header inspection performed before decompression starts.

use std::io::{self, Read};

use zstd::zstd_safe;

use crate::error::CodecError;

/// Largest zstd frame header: magic (4) + descriptor (1) + window (1) +
/// dictionary id (4) + content size (8).
pub const FRAME_HEADER_MAX: usize = 18;

/// Content size declared by a frame header.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ContentSize {
    /// The header declares the exact decompressed length.
    Known(u64),
    /// The frame was written without a declared size (streaming mode).
    Unknown,
    /// The header is invalid or too short to be parsed.
    Error,
}

/// Metadata extracted from the leading bytes of a zstd frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FrameMetadata {
    content_size: ContentSize,
}

impl FrameMetadata {
    /// Parses the header at the start of `header`.
    ///
    /// `header` may hold the whole frame or only its first
    /// [`FRAME_HEADER_MAX`] bytes.
    #[must_use]
    pub fn from_header(header: &[u8]) -> Self {
        let content_size = match zstd_safe::get_frame_content_size(header) {
            Ok(Some(size)) => ContentSize::Known(size),
            Ok(None) => ContentSize::Unknown,
            Err(_) => ContentSize::Error,
        };
        Self { content_size }
    }

    /// Reads up to [`FRAME_HEADER_MAX`] bytes from `source` into `header`.
    ///
    /// Returns the metadata together with the number of bytes read; the
    /// caller replays `header[..read]` in front of the rest of the source.
    pub fn probe<R>(source: &mut R, header: &mut [u8; FRAME_HEADER_MAX]) -> io::Result<(Self, usize)>
    where
        R: Read + ?Sized,
    {
        let mut read = 0;
        while read < header.len() {
            match source.read(&mut header[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        }
        Ok((Self::from_header(&header[..read]), read))
    }

    /// Returns the declared content size.
    #[must_use]
    pub const fn content_size(&self) -> ContentSize {
        self.content_size
    }

    /// Returns the declared size when the header carries one.
    #[must_use]
    pub const fn declared_size(&self) -> Option<u64> {
        match self.content_size {
            ContentSize::Known(size) => Some(size),
            ContentSize::Unknown | ContentSize::Error => None,
        }
    }

    /// Rejects headers whose content size could not be determined.
    pub fn validate(self) -> Result<Self, CodecError> {
        match self.content_size {
            ContentSize::Error => Err(CodecError::MalformedFrame {
                reason: "frame header is invalid or incomplete",
            }),
            ContentSize::Known(_) | ContentSize::Unknown => Ok(self),
        }
    }
}
