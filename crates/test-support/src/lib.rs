//! Shared fixtures for zpipe tests.
//!
//! Data generators are deterministic so failures reproduce without recording
//! seeds, and file helpers keep every artefact inside a [`TempDir`] that is
//! removed when the test ends.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use tempfile::TempDir;

/// Creates a fresh temporary directory for one test.
pub fn temp_dir() -> io::Result<TempDir> {
    tempfile::Builder::new().prefix("zpipe-test-").tempdir()
}

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Deterministic pseudo-random bytes from a linear congruential generator.
///
/// The output is effectively incompressible for zstd.
#[must_use]
pub fn pseudo_random_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed ^ 0x1234_5678;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

/// Highly compressible text: a fixed sentence repeated until `len` bytes.
#[must_use]
pub fn compressible_text(len: usize) -> Vec<u8> {
    const SENTENCE: &[u8] = b"The same text repeated over and over again. ";
    SENTENCE.iter().copied().cycle().take(len).collect()
}

/// Bytes `0, 1, ..., 255, 0, 1, ...` up to `len`.
#[must_use]
pub fn ascending_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}
