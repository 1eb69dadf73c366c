//! Direction selection and default output naming.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name suffix of zstd streams.
pub const ZST_SUFFIX: &str = ".zst";

/// Suffix appended to decompressed output when the input has no `.zst` suffix.
pub const DECOMPRESSED_SUFFIX: &str = ".dec";

/// Which way a pipeline run transforms its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Raw input, zstd output.
    Compress,
    /// zstd input, raw output.
    Decompress,
}

impl Direction {
    /// Chooses a direction from the file name: a `.zst` suffix (any case)
    /// means decompress, anything else compress.
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        if has_zst_suffix(path) {
            Self::Decompress
        } else {
            Self::Compress
        }
    }

    /// Default destination for `input`.
    ///
    /// Compression appends `.zst`. Decompression strips a `.zst` suffix, or
    /// appends `.dec` when the name has none (or would become empty).
    #[must_use]
    pub fn output_path(self, input: &Path) -> PathBuf {
        match self {
            Self::Compress => with_appended_suffix(input, ZST_SUFFIX),
            Self::Decompress => strip_zst_suffix(input)
                .unwrap_or_else(|| with_appended_suffix(input, DECOMPRESSED_SUFFIX)),
        }
    }

    /// Returns the lowercase name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compress => "compress",
            Self::Decompress => "decompress",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compress" | "c" | "z" => Ok(Self::Compress),
            "decompress" | "d" => Ok(Self::Decompress),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

fn file_name_lossy(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn has_zst_suffix(path: &Path) -> bool {
    file_name_lossy(path).is_some_and(|name| {
        name.len() > ZST_SUFFIX.len() && name.to_ascii_lowercase().ends_with(ZST_SUFFIX)
    })
}

fn strip_zst_suffix(path: &Path) -> Option<PathBuf> {
    if !has_zst_suffix(path) {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    let stem = &name[..name.len() - ZST_SUFFIX.len()];
    Some(path.with_file_name(stem))
}

fn with_appended_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
