//! Conversion of parsed arguments into a [`PipelineConfig`].

use std::path::{Path, PathBuf};

use checksums::{Digest, DigestParseError};
use compress::{CompressionLevel, CompressionLevelError};
use pipeline::{Direction, PipelineConfig};
use thiserror::Error;

use super::arguments::ParsedArgs;

/// Largest accepted `--buffer-size`.
pub(crate) const MAX_BUFFER_SIZE: usize = 1 << 30;

/// Invalid option value. Always reported with exit code 1.
#[derive(Debug, Error)]
pub(crate) enum OptionError {
    #[error("--level: {0}")]
    Level(#[from] CompressionLevelError),
    #[error("--threads: '{value}' is not a thread count")]
    Threads { value: String },
    #[error("--buffer-size: '{value}' is not a size between 1 byte and 1G")]
    BufferSize { value: String },
    #[error("--expect-sha256: {0}")]
    Digest(#[from] DigestParseError),
    #[error("--expect-sha256 cannot be combined with --no-verify")]
    DigestWithoutVerify,
    #[error("--expect-sha256 only applies when decompressing; '{}' would be compressed", path.display())]
    DigestOnCompress { path: PathBuf },
}

/// Builds the pipeline configuration described by `parsed`.
pub(crate) fn pipeline_config(parsed: &ParsedArgs) -> Result<PipelineConfig, OptionError> {
    let direction = if parsed.compress {
        Some(Direction::Compress)
    } else if parsed.decompress {
        Some(Direction::Decompress)
    } else {
        None
    };

    let mut config = PipelineConfig::new()
        .direction(direction)
        .verify(!parsed.no_verify)
        .checksum(!parsed.no_checksum)
        .overwrite(parsed.force)
        .keep_partial(parsed.keep_partial)
        .output(parsed.output.as_ref().map(PathBuf::from));

    if let Some(level) = parsed.level.as_deref() {
        config = config.level(level.parse::<CompressionLevel>()?);
    }
    if let Some(threads) = parsed.threads.as_deref() {
        let workers = threads
            .trim()
            .parse::<u32>()
            .map_err(|_| OptionError::Threads {
                value: threads.to_owned(),
            })?;
        config = config.workers(workers);
    }
    if let Some(size) = parsed.buffer_size.as_deref() {
        let capacity = parse_size(size).ok_or_else(|| OptionError::BufferSize {
            value: size.to_owned(),
        })?;
        config = config.buffer_capacity(capacity);
    }
    if let Some(hex) = parsed.expect_sha256.as_deref() {
        if parsed.no_verify {
            return Err(OptionError::DigestWithoutVerify);
        }
        config = config.expected_digest(Some(hex.parse::<Digest>()?));
    }
    Ok(config)
}

/// Rejects a reference digest for a file that will be compressed.
pub(crate) fn check_reference(config: &PipelineConfig, file: &Path) -> Result<(), OptionError> {
    if config.reference_digest().is_some() && config.direction_for(file) == Direction::Compress {
        return Err(OptionError::DigestOnCompress {
            path: file.to_path_buf(),
        });
    }
    Ok(())
}

/// Parses a byte count with an optional binary `K`, `M` or `G` suffix.
fn parse_size(text: &str) -> Option<usize> {
    let text = text.trim();
    let (digits, multiplier) = match text.chars().last()?.to_ascii_uppercase() {
        'K' => (&text[..text.len() - 1], 1_usize << 10),
        'M' => (&text[..text.len() - 1], 1 << 20),
        'G' => (&text[..text.len() - 1], 1 << 30),
        _ => (text, 1),
    };
    digits
        .parse::<usize>()
        .ok()
        .and_then(|value| value.checked_mul(multiplier))
        .filter(|size| (1..=MAX_BUFFER_SIZE).contains(size))
}
