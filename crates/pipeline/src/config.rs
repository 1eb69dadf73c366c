//! Options controlling a single pipeline run.

use std::path::{Path, PathBuf};

use checksums::Digest;
use compress::{CompressionLevel, DEFAULT_BUFFER_CAPACITY};

use crate::direction::Direction;

/// Configuration for [`run`](crate::run).
///
/// Built with chained setters starting from [`PipelineConfig::new`]:
///
/// ```
/// use compress::CompressionLevel;
/// use pipeline::{Direction, PipelineConfig};
///
/// let config = PipelineConfig::new()
///     .direction(Some(Direction::Compress))
///     .level(CompressionLevel::Best)
///     .workers(4)
///     .verify(false);
/// assert_eq!(config.workers_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    direction: Option<Direction>,
    level: CompressionLevel,
    workers: u32,
    verify: bool,
    checksum: bool,
    expected_digest: Option<Digest>,
    output: Option<PathBuf>,
    overwrite: bool,
    keep_partial: bool,
    buffer_capacity: usize,
}

impl PipelineConfig {
    /// Creates a configuration with the defaults: direction from the file
    /// name, level 3, single-threaded, verification and frame checksum on,
    /// 64 KiB buffers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            direction: None,
            level: CompressionLevel::Default,
            workers: 0,
            verify: true,
            checksum: true,
            expected_digest: None,
            output: None,
            overwrite: false,
            keep_partial: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Forces a direction; `None` selects it from the `.zst` suffix.
    pub fn direction(mut self, direction: Option<Direction>) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the compression level.
    pub fn level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the number of compression worker threads (0 = calling thread only).
    pub fn workers(mut self, workers: u32) -> Self {
        self.workers = workers;
        self
    }

    /// Enables or disables SHA-256 verification.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Enables or disables the content checksum in the zstd frame epilogue.
    pub fn checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    /// Reference digest the decompressed output must match.
    pub fn expected_digest(mut self, digest: Option<Digest>) -> Self {
        self.expected_digest = digest;
        self
    }

    /// Explicit destination path.
    pub fn output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Allows replacing an existing destination.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Keeps partially written output when a run fails.
    pub fn keep_partial(mut self, keep_partial: bool) -> Self {
        self.keep_partial = keep_partial;
        self
    }

    /// Capacity of each pump buffer; zero is rounded up to one byte.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }

    /// Direction for `input`: the forced one, or the one implied by its name.
    #[must_use]
    pub fn direction_for(&self, input: &Path) -> Direction {
        self.direction.unwrap_or_else(|| Direction::detect(input))
    }

    /// Destination for `input` when running in `direction`.
    #[must_use]
    pub fn destination_for(&self, input: &Path, direction: Direction) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| direction.output_path(input))
    }

    /// Returns the configured compression level.
    #[must_use]
    pub const fn compression_level(&self) -> CompressionLevel {
        self.level
    }

    /// Returns the configured worker count.
    #[must_use]
    pub const fn workers_count(&self) -> u32 {
        self.workers
    }

    /// Returns whether SHA-256 verification is enabled.
    #[must_use]
    pub const fn verifies(&self) -> bool {
        self.verify
    }

    /// Returns whether frames carry a content checksum.
    #[must_use]
    pub const fn writes_checksum(&self) -> bool {
        self.checksum
    }

    /// Returns the reference digest, if any.
    #[must_use]
    pub const fn reference_digest(&self) -> Option<&Digest> {
        self.expected_digest.as_ref()
    }

    /// Returns whether an existing destination may be replaced.
    #[must_use]
    pub const fn overwrites(&self) -> bool {
        self.overwrite
    }

    /// Returns whether partial output survives a failed run.
    #[must_use]
    pub const fn keeps_partial(&self) -> bool {
        self.keep_partial
    }

    /// Returns the pump buffer capacity.
    #[must_use]
    pub const fn buffer_size(&self) -> usize {
        self.buffer_capacity
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
