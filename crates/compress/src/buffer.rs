//! Fixed-capacity exchange buffer shared between the pump and a codec session.
//!
//! A [`Buffer`] owns a byte region whose capacity is chosen once at
//! construction and never changes afterwards. Two cursors describe its
//! contents: `filled` marks the end of valid data and `consumed` marks how much
//! of that data has already been handed to the codec. The invariant
//! `consumed <= filled <= capacity` holds at every observation point.
//!
//! The same type serves both directions. As an input buffer it is filled from
//! a reader and drained by [`CodecSession::feed`](crate::CodecSession::feed);
//! as an output buffer the session appends produced bytes after `filled` and
//! the pump writes [`Buffer::filled_bytes`] to the destination before calling
//! [`Buffer::reset`].

use std::fmt;
use std::io::{self, Read};

/// Default buffer capacity (64 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 16;

/// Fixed-capacity byte region with consumed/filled cursors.
pub struct Buffer {
    storage: Box<[u8]>,
    filled: usize,
    consumed: usize,
}

impl Buffer {
    /// Allocates a zeroed buffer holding at most `capacity` bytes.
    ///
    /// A zero capacity is rounded up to one byte so the codec can always make
    /// progress.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0_u8; capacity.max(1)].into_boxed_slice(),
            filled: 0,
            consumed: 0,
        }
    }

    /// Returns the fixed capacity chosen at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the number of valid bytes in the buffer.
    #[must_use]
    pub const fn filled(&self) -> usize {
        self.filled
    }

    /// Returns how many of the valid bytes have been consumed.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Returns `filled - consumed`.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.filled - self.consumed
    }

    /// Returns the number of bytes that can still be appended after `filled`.
    #[must_use]
    pub fn spare_capacity(&self) -> usize {
        self.capacity() - self.filled
    }

    /// Reports whether the buffer holds no valid bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Clears both cursors without touching the storage.
    pub fn reset(&mut self) {
        self.filled = 0;
        self.consumed = 0;
    }

    /// Refills the buffer from `source`.
    ///
    /// Reads until `min(capacity, max)` bytes are available or the source
    /// reports end of input, retrying interrupted reads. Any previous content
    /// is discarded: `filled` becomes the number of bytes read and `consumed`
    /// returns to zero. A return value of `0` signals end of input.
    pub fn fill_from<R>(&mut self, source: &mut R, max: usize) -> io::Result<usize>
    where
        R: Read + ?Sized,
    {
        self.reset();
        let window = self.capacity().min(max);
        while self.filled < window {
            match source.read(&mut self.storage[self.filled..window]) {
                Ok(0) => break,
                Ok(read) => self.filled += read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => {
                    self.reset();
                    return Err(error);
                }
            }
        }
        Ok(self.filled)
    }

    /// Returns the valid bytes, `storage[..filled]`.
    #[must_use]
    pub fn filled_bytes(&self) -> &[u8] {
        &self.storage[..self.filled]
    }

    /// Returns the valid bytes that have not been consumed yet.
    #[must_use]
    pub fn unconsumed(&self) -> &[u8] {
        &self.storage[self.consumed..self.filled]
    }

    /// Marks `count` more bytes as consumed.
    pub(crate) fn consume(&mut self, count: usize) {
        debug_assert!(count <= self.remaining());
        self.consumed = (self.consumed + count).min(self.filled);
    }

    /// Grants the codec write access to the whole storage together with the
    /// current `filled` position so it can append after existing content.
    pub(crate) fn output_parts(&mut self) -> (&mut [u8], usize) {
        (&mut self.storage[..], self.filled)
    }

    /// Records a new `filled` position after the codec appended output.
    pub(crate) fn set_filled(&mut self, filled: usize) {
        debug_assert!(filled >= self.filled && filled <= self.capacity());
        self.filled = filled.min(self.capacity());
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("capacity", &self.capacity())
            .field("filled", &self.filled)
            .field("consumed", &self.consumed)
            .finish()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }
}
