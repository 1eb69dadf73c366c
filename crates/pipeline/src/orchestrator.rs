//! Runs one file through the compress or decompress pipeline.
//!
//! The orchestrator owns everything file-related: picking the direction and
//! destination, guarding against overwrites, removing partial output after a
//! failure, and sequencing the digest passes around the pump.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use checksums::{Digest, DigestVerifier, HashingWriter};
use compress::{
    CompressOptions, PumpConfig, compress_stream, decompress_probed, decompress_stream, probe_frame,
};
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::direction::Direction;
use crate::error::PipelineError;
use crate::result::{Benefit, PipelineResult};

/// Compresses or decompresses `path` as described by `config`.
///
/// On success the destination holds the complete output. A malformed frame
/// header is rejected before the destination is opened. When the pump fails
/// the partial destination is removed unless
/// [`keep_partial`](PipelineConfig::keep_partial) is set. A verification
/// mismatch leaves the output in place and returns
/// [`PipelineError::VerificationMismatch`] carrying the full result.
pub fn run(path: &Path, config: &PipelineConfig) -> Result<PipelineResult, PipelineError> {
    let direction = config.direction_for(path);
    let destination = config.destination_for(path, direction);
    info!(
        target: "zpipe::pipeline",
        %direction,
        source = %path.display(),
        destination = %destination.display(),
        "starting"
    );

    let metadata = fs::metadata(path).map_err(|err| PipelineError::io("open", path, err))?;
    if !metadata.is_file() {
        return Err(PipelineError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    check_destination(path, &destination, config)?;
    if config.reference_digest().is_some()
        && (direction == Direction::Compress || !config.verifies())
    {
        warn!(
            target: "zpipe::pipeline",
            %direction,
            verify = config.verifies(),
            "reference digest is ignored for this run"
        );
    }

    let result = match direction {
        Direction::Compress => compress_file(path, &destination, metadata.len(), config),
        Direction::Decompress => decompress_file(path, &destination, config),
    }?;

    match result.verified {
        Some(false) => {
            warn!(
                target: "zpipe::pipeline",
                destination = %result.destination.display(),
                "verification failed; output left in place"
            );
            return Err(PipelineError::VerificationMismatch(Box::new(result)));
        }
        Some(true) => info!(target: "zpipe::pipeline", "verification passed"),
        None => {}
    }

    if direction == Direction::Compress && result.benefit() == Benefit::NoBenefit {
        warn!(
            target: "zpipe::pipeline",
            original = result.original_size(),
            compressed = result.compressed_size(),
            "compression did not reduce the size"
        );
    }
    info!(
        target: "zpipe::pipeline",
        %direction,
        input = result.input_size,
        output = result.output_size,
        ratio = result.ratio(),
        "finished"
    );
    Ok(result)
}

fn check_destination(
    source: &Path,
    destination: &Path,
    config: &PipelineConfig,
) -> Result<(), PipelineError> {
    if destination == source {
        return Err(PipelineError::SameFile {
            path: source.to_path_buf(),
        });
    }
    if !destination.exists() {
        return Ok(());
    }
    if let (Ok(a), Ok(b)) = (fs::canonicalize(source), fs::canonicalize(destination)) {
        if a == b {
            return Err(PipelineError::SameFile {
                path: source.to_path_buf(),
            });
        }
    }
    if config.overwrites() {
        Ok(())
    } else {
        Err(PipelineError::DestinationExists {
            path: destination.to_path_buf(),
        })
    }
}

fn create_destination(path: &Path, config: &PipelineConfig) -> Result<File, PipelineError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if config.overwrites() {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path).map_err(|err| {
        if err.kind() == io::ErrorKind::AlreadyExists {
            PipelineError::DestinationExists {
                path: path.to_path_buf(),
            }
        } else {
            PipelineError::io("create", path, err)
        }
    })
}

fn discard_partial(path: &Path, config: &PipelineConfig) {
    if config.keeps_partial() {
        debug!(target: "zpipe::pipeline", path = %path.display(), "keeping partial output");
        return;
    }
    match fs::remove_file(path) {
        Ok(()) => warn!(
            target: "zpipe::pipeline",
            path = %path.display(),
            "removed partial output"
        ),
        Err(err) => warn!(
            target: "zpipe::pipeline",
            path = %path.display(),
            error = %err,
            "could not remove partial output"
        ),
    }
}

fn compress_file(
    source: &Path,
    destination: &Path,
    source_len: u64,
    config: &PipelineConfig,
) -> Result<PipelineResult, PipelineError> {
    let verifier = DigestVerifier::new();
    let source_digest = if config.verifies() {
        Some(
            verifier
                .digest_file(source)
                .map_err(|err| PipelineError::io("read", source, err))?,
        )
    } else {
        None
    };

    let options = CompressOptions::new(config.compression_level())
        .workers(config.workers_count())
        .checksum(config.writes_checksum())
        .pledged_size(Some(source_len));
    let pump = PumpConfig::with_capacity(config.buffer_size());

    let mut input = File::open(source).map_err(|err| PipelineError::io("open", source, err))?;
    let mut output = create_destination(destination, config)?;
    let report = match compress_stream(&mut input, &mut output, &options, pump) {
        Ok(report) => report,
        Err(err) => {
            drop(output);
            discard_partial(destination, config);
            return Err(PipelineError::from_pump(err, source, destination, source));
        }
    };
    drop(output);

    let mut result = PipelineResult {
        direction: Direction::Compress,
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        input_size: report.bytes_read,
        output_size: report.bytes_written,
        declared_size: Some(source_len),
        verified: None,
        source_digest,
        output_digest: None,
    };

    if let Some(baseline) = source_digest {
        let round_trip = digest_round_trip(destination, pump)?;
        result.output_digest = Some(round_trip);
        result.verified = Some(DigestVerifier::equal(&baseline, &round_trip));
    }
    Ok(result)
}

/// Decodes the frame at `path` into a hashing sink and returns the digest
/// of the decoded bytes.
fn digest_round_trip(path: &Path, pump: PumpConfig) -> Result<Digest, PipelineError> {
    let mut frame = File::open(path).map_err(|err| PipelineError::io("open", path, err))?;
    let mut sink = HashingWriter::new(io::sink());
    decompress_stream(&mut frame, &mut sink, pump)
        .map_err(|err| PipelineError::from_pump(err, path, path, path))?;
    let (_, digest) = sink.finalize();
    debug!(target: "zpipe::verify", %digest, "round trip decoded");
    Ok(digest)
}

fn decompress_file(
    source: &Path,
    destination: &Path,
    config: &PipelineConfig,
) -> Result<PipelineResult, PipelineError> {
    let pump = PumpConfig::with_capacity(config.buffer_size());
    let mut input = File::open(source).map_err(|err| PipelineError::io("open", source, err))?;
    let probed = probe_frame(&mut input)
        .map_err(|err| PipelineError::from_pump(err, source, destination, source))?;
    let mut output = create_destination(destination, config)?;
    let report = match decompress_probed(&probed, &mut input, &mut output, pump) {
        Ok(report) => report,
        Err(err) => {
            drop(output);
            discard_partial(destination, config);
            return Err(PipelineError::from_pump(err, source, destination, source));
        }
    };
    drop(output);

    let mut result = PipelineResult {
        direction: Direction::Decompress,
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        input_size: report.bytes_read,
        output_size: report.bytes_written,
        declared_size: probed.metadata().declared_size(),
        verified: None,
        source_digest: None,
        output_digest: None,
    };

    if config.verifies() {
        let digest = DigestVerifier::new()
            .digest_file(destination)
            .map_err(|err| PipelineError::io("read", destination, err))?;
        result.output_digest = Some(digest);
        result.verified = config
            .reference_digest()
            .map(|expected| DigestVerifier::equal(expected, &digest));
    }
    Ok(result)
}
