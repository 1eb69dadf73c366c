//! Streaming digest computation over readers and writers.

use std::fs::File;
use std::io::{self, IoSlice, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::strong::Sha256;
use crate::value::Digest;

/// Default read chunk used by [`DigestVerifier`] (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Computes SHA-256 digests over byte streams in fixed-size chunks.
///
/// The chunk buffer is independent of any codec buffers, so a digest over a
/// file can be taken before or after a pump run without sharing memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DigestVerifier {
    chunk_size: usize,
}

impl DigestVerifier {
    /// Creates a verifier reading [`DEFAULT_CHUNK_SIZE`] bytes at a time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Overrides the chunk size; zero is rounded up to one byte.
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Returns the configured chunk size.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Streams `source` to its end and returns the digest of every byte read.
    pub fn digest<R>(&self, source: &mut R) -> io::Result<Digest>
    where
        R: Read + ?Sized,
    {
        let mut chunk = vec![0_u8; self.chunk_size];
        let mut hasher = Sha256::new();
        let mut total = 0_u64;
        loop {
            let read = match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            };
            hasher.update(&chunk[..read]);
            total += read as u64;
        }
        let digest = hasher.finalize();
        debug!(target: "zpipe::verify", bytes = total, %digest, "digest computed");
        Ok(digest)
    }

    /// Opens `path` and returns the digest of its contents.
    pub fn digest_file(&self, path: &Path) -> io::Result<Digest> {
        let mut file = File::open(path)?;
        self.digest(&mut file)
    }

    /// Exact byte comparison of two digests.
    #[must_use]
    pub fn equal(a: &Digest, b: &Digest) -> bool {
        a.as_bytes() == b.as_bytes()
    }
}

impl Default for DigestVerifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer adapter that hashes every byte accepted by the wrapped sink.
///
/// Pairing it with [`io::sink`] digests a produced stream without storing it.
#[derive(Debug)]
pub struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
    bytes: u64,
}

impl<W> HashingWriter<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            bytes: 0,
        }
    }

    /// Returns the number of bytes hashed so far.
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Consumes the adapter, returning the sink and the digest of everything written.
    pub fn finalize(self) -> (W, Digest) {
        (self.inner, self.hasher.finalize())
    }
}

impl<W> Write for HashingWriter<W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.hasher.update(&buf[..written]);
        self.bytes += written as u64;
        Ok(written)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let buf = bufs.iter().find(|buf| !buf.is_empty()).map_or(&[][..], |buf| &**buf);
        self.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC_HEX: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn digest_is_independent_of_chunk_size() {
        let data = b"abc".repeat(10_000);
        let reference = Sha256::digest(&data);
        for chunk in [1, 7, 4096, DEFAULT_CHUNK_SIZE, 1 << 20] {
            let verifier = DigestVerifier::with_chunk_size(chunk);
            assert_eq!(verifier.digest(&mut data.as_slice()).unwrap(), reference);
        }
    }

    #[test]
    fn digest_of_abc_matches_vector() {
        let digest = DigestVerifier::new().digest(&mut &b"abc"[..]).unwrap();
        assert_eq!(digest.to_hex(), ABC_HEX);
    }

    #[test]
    fn zero_chunk_size_rounds_up() {
        assert_eq!(DigestVerifier::with_chunk_size(0).chunk_size(), 1);
        assert_eq!(DigestVerifier::default().chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn equal_compares_bytes() {
        let a = Sha256::digest(b"a");
        let b = Sha256::digest(b"b");
        assert!(DigestVerifier::equal(&a, &a));
        assert!(!DigestVerifier::equal(&a, &b));
    }

    #[test]
    fn hashing_writer_matches_one_shot() {
        let mut writer = HashingWriter::new(Vec::new());
        writer.write_all(b"ab").unwrap();
        writer
            .write_vectored(&[IoSlice::new(b""), IoSlice::new(b"c")])
            .unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.bytes(), 3);
        let (inner, digest) = writer.finalize();
        assert_eq!(inner, b"abc");
        assert_eq!(digest.to_hex(), ABC_HEX);
    }

    #[test]
    fn hashing_writer_over_sink() {
        let mut writer = HashingWriter::new(io::sink());
        writer.write_all(&[0_u8; 1000]).unwrap();
        let (_, digest) = writer.finalize();
        assert_eq!(digest, Sha256::digest(&[0_u8; 1000]));
    }

    #[test]
    fn digest_file_reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        std::fs::write(&path, b"abc").unwrap();
        let digest = DigestVerifier::new().digest_file(&path).unwrap();
        assert_eq!(digest.to_hex(), ABC_HEX);
    }
}
