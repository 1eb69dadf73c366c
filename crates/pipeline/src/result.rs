//! Structured outcome of a pipeline run.

use std::path::PathBuf;

use checksums::Digest;

use crate::direction::Direction;

/// Whether compression reduced the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Benefit {
    /// The compressed form is smaller than the original.
    Reduced,
    /// The compressed form is as large as or larger than the original.
    NoBenefit,
}

/// Sizes, digests and verification status of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PipelineResult {
    /// Direction the run took.
    pub direction: Direction,
    /// File that was read.
    pub source: PathBuf,
    /// File that was written.
    pub destination: PathBuf,
    /// Bytes read from the source.
    pub input_size: u64,
    /// Bytes written to the destination.
    pub output_size: u64,
    /// Content size declared by the frame header (decompression only).
    pub declared_size: Option<u64>,
    /// `Some(true)` when digests matched, `Some(false)` on mismatch, `None`
    /// when nothing was compared.
    pub verified: Option<bool>,
    /// Digest of the uncompressed source (compression with verification).
    pub source_digest: Option<Digest>,
    /// Digest of the uncompressed output: the decoded round trip after
    /// compression, or the written file after decompression.
    pub output_digest: Option<Digest>,
}

impl PipelineResult {
    /// Size of the uncompressed side.
    #[must_use]
    pub const fn original_size(&self) -> u64 {
        match self.direction {
            Direction::Compress => self.input_size,
            Direction::Decompress => self.output_size,
        }
    }

    /// Size of the compressed side.
    #[must_use]
    pub const fn compressed_size(&self) -> u64 {
        match self.direction {
            Direction::Compress => self.output_size,
            Direction::Decompress => self.input_size,
        }
    }

    /// `compressed / original`; `0.0` when the original is empty.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        match self.original_size() {
            0 => 0.0,
            original => self.compressed_size() as f64 / original as f64,
        }
    }

    /// Percentage of the original size saved; negative when the data grew,
    /// `0.0` when the original is empty.
    #[must_use]
    pub fn space_saved(&self) -> f64 {
        match self.original_size() {
            0 => 0.0,
            _ => (1.0 - self.ratio()) * 100.0,
        }
    }

    /// Classifies the run by whether the compressed side is smaller.
    #[must_use]
    pub const fn benefit(&self) -> Benefit {
        if self.compressed_size() < self.original_size() {
            Benefit::Reduced
        } else {
            Benefit::NoBenefit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(direction: Direction, input_size: u64, output_size: u64) -> PipelineResult {
        PipelineResult {
            direction,
            source: PathBuf::from("in"),
            destination: PathBuf::from("out"),
            input_size,
            output_size,
            declared_size: None,
            verified: None,
            source_digest: None,
            output_digest: None,
        }
    }

    #[test]
    fn compress_ratio_is_output_over_input() {
        let r = result(Direction::Compress, 1000, 250);
        assert!((r.ratio() - 0.25).abs() < f64::EPSILON);
        assert!((r.space_saved() - 75.0).abs() < 1e-9);
        assert_eq!(r.benefit(), Benefit::Reduced);
    }

    #[test]
    fn decompress_ratio_uses_output_as_original() {
        let r = result(Direction::Decompress, 250, 1000);
        assert_eq!(r.original_size(), 1000);
        assert_eq!(r.compressed_size(), 250);
        assert!((r.ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn growth_is_no_benefit() {
        let r = result(Direction::Compress, 100, 113);
        assert!(r.ratio() > 1.0);
        assert!(r.space_saved() < 0.0);
        assert_eq!(r.benefit(), Benefit::NoBenefit);

        let equal = result(Direction::Compress, 100, 100);
        assert_eq!(equal.benefit(), Benefit::NoBenefit);
    }

    #[test]
    fn empty_original_reports_zero_ratio() {
        let r = result(Direction::Compress, 0, 13);
        assert_eq!(r.ratio(), 0.0);
        assert_eq!(r.space_saved(), 0.0);
        assert_eq!(r.benefit(), Benefit::NoBenefit);
    }
}
