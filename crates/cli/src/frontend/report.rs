//! Rendering of pipeline outcomes.
//!
//! The text report is a fixed-width box, one for each direction:
//!
//! ```text
//! +---------------------------+--------------------------+
//! | ZSTD COMPRESSION REPORT   |                          |
//! +---------------------------+--------------------------+
//! | File                      | notes.txt.zst            |
//! | Original Size             |       1000 bytes         |
//! | Compressed Size           |         37 bytes         |
//! | Compression Ratio         |      0.037               |
//! | Space Saved               |     96.30 %              |
//! | Verification              | PASSED                   |
//! +---------------------------+--------------------------+
//! SHA-256 (decoded): 0f8a...
//! ```

use std::fmt::Write as _;
use std::path::Path;

use pipeline::{Benefit, Direction, ExitCode, PipelineResult};
use serde::Serialize;

const RULE: &str = "+---------------------------+--------------------------+\n";

/// Short verification status shown in reports.
pub(crate) fn verification_label(result: &PipelineResult) -> &'static str {
    match (result.verified, result.output_digest.is_some()) {
        (Some(true), _) => "PASSED",
        (Some(false), _) => "FAILED",
        (None, true) => "no reference",
        (None, false) => "skipped",
    }
}

/// Renders the boxed text report for `result`.
pub(crate) fn render_text(result: &PipelineResult) -> String {
    let mut out = String::from("\n");
    out.push_str(RULE);
    match result.direction {
        Direction::Compress => out.push_str("| ZSTD COMPRESSION REPORT   |                          |\n"),
        Direction::Decompress => out.push_str("| ZSTD DECOMPRESSION CHECK  |                          |\n"),
    }
    out.push_str(RULE);
    let _ = writeln!(out, "| File                      | {:<24} |", display_name(&result.destination));
    let _ = writeln!(out, "| Original Size             | {:>10} bytes         |", result.original_size());
    let _ = writeln!(out, "| Compressed Size           | {:>10} bytes         |", result.compressed_size());
    if let Some(declared) = result.declared_size {
        if result.direction == Direction::Decompress {
            let _ = writeln!(out, "| Declared Size             | {declared:>10} bytes         |");
        }
    }
    let _ = writeln!(out, "| Compression Ratio         | {:>10.3}               |", result.ratio());
    let _ = writeln!(out, "| Space Saved               | {:>9.2} %              |", result.space_saved());
    let _ = writeln!(out, "| Verification              | {:<24} |", verification_label(result));
    out.push_str(RULE);

    if let Some(digest) = result.output_digest {
        let label = match result.direction {
            Direction::Compress => "decoded",
            Direction::Decompress => "decompressed",
        };
        let _ = writeln!(out, "SHA-256 ({label}): {digest}");
    }
    if result.direction == Direction::Compress && result.benefit() == Benefit::NoBenefit {
        out.push_str("Note: File is too small to benefit from compression.\n");
    }
    out
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: &'static str,
    exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(flatten)]
    result: Option<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    #[serde(flatten)]
    result: &'a PipelineResult,
    original_size: u64,
    compressed_size: u64,
    ratio: f64,
    space_saved: f64,
    benefit: Benefit,
    verification: &'static str,
}

impl<'a> JsonResult<'a> {
    fn new(result: &'a PipelineResult) -> Self {
        Self {
            result,
            original_size: result.original_size(),
            compressed_size: result.compressed_size(),
            ratio: result.ratio(),
            space_saved: result.space_saved(),
            benefit: result.benefit(),
            verification: verification_label(result),
        }
    }
}

/// Renders a run as a single JSON document followed by a newline.
///
/// `error` is the diagnostic for failed runs; `result` is present for
/// successes and for verification mismatches.
pub(crate) fn render_json(
    code: ExitCode,
    result: Option<&PipelineResult>,
    error: Option<String>,
) -> Result<String, serde_json::Error> {
    let status = match code {
        ExitCode::Ok => "ok",
        ExitCode::VerificationMismatch => "verification_failed",
        _ => "error",
    };
    let report = JsonReport {
        status,
        exit_code: code.as_i32(),
        error,
        result: result.map(JsonResult::new),
    };
    let mut text = serde_json::to_string_pretty(&report)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use checksums::Digest;

    use super::*;

    fn result(direction: Direction, input_size: u64, output_size: u64) -> PipelineResult {
        PipelineResult {
            direction,
            source: PathBuf::from("/data/notes.txt"),
            destination: PathBuf::from("/data/notes.txt.zst"),
            input_size,
            output_size,
            declared_size: None,
            verified: Some(true),
            source_digest: Some(Digest::from_bytes([1; 32])),
            output_digest: Some(Digest::from_bytes([1; 32])),
        }
    }

    #[test]
    fn compression_box_matches_fixed_layout() {
        let text = render_text(&result(Direction::Compress, 1000, 37));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], RULE.trim_end());
        assert_eq!(lines[2], "| ZSTD COMPRESSION REPORT   |                          |");
        assert_eq!(lines[4], "| File                      | notes.txt.zst            |");
        assert_eq!(lines[5], "| Original Size             |       1000 bytes         |");
        assert_eq!(lines[6], "| Compressed Size           |         37 bytes         |");
        assert_eq!(lines[7], "| Compression Ratio         |      0.037               |");
        assert_eq!(lines[8], "| Space Saved               |     96.30 %              |");
        assert_eq!(lines[9], "| Verification              | PASSED                   |");
        for line in &lines[1..=10] {
            assert_eq!(line.len(), RULE.trim_end().len(), "{line}");
        }
        assert!(lines[11].starts_with("SHA-256 (decoded): 0101"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn no_benefit_adds_note() {
        let text = render_text(&result(Direction::Compress, 10, 23));
        assert!(text.ends_with("Note: File is too small to benefit from compression.\n"));
        assert!(text.contains("|   -130.00 %"));
    }

    #[test]
    fn decompression_box_shows_declared_size() {
        let mut r = result(Direction::Decompress, 37, 1000);
        r.declared_size = Some(1000);
        r.verified = None;
        let text = render_text(&r);
        assert!(text.contains("| ZSTD DECOMPRESSION CHECK  |"));
        assert!(text.contains("| Declared Size             |       1000 bytes         |"));
        assert!(text.contains("| Verification              | no reference             |"));
        assert!(text.contains("SHA-256 (decompressed): "));
    }

    #[test]
    fn verification_labels() {
        let mut r = result(Direction::Compress, 1, 1);
        assert_eq!(verification_label(&r), "PASSED");
        r.verified = Some(false);
        assert_eq!(verification_label(&r), "FAILED");
        r.verified = None;
        r.output_digest = None;
        assert_eq!(verification_label(&r), "skipped");
    }

    #[test]
    fn json_includes_derived_fields() {
        let text = render_json(ExitCode::Ok, Some(&result(Direction::Compress, 1000, 250)), None)
            .expect("json");
        let value: serde_json::Value = serde_json::from_str(&text).expect("parse");
        assert_eq!(value["status"], "ok");
        assert_eq!(value["exit_code"], 0);
        assert_eq!(value["direction"], "compress");
        assert_eq!(value["input_size"], 1000);
        assert_eq!(value["compressed_size"], 250);
        assert_eq!(value["ratio"], 0.25);
        assert_eq!(value["benefit"], "reduced");
        assert_eq!(value["verification"], "PASSED");
        assert_eq!(value["output_digest"], "01".repeat(32));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn json_error_without_result() {
        let text = render_json(ExitCode::MalformedFrame, None, Some("bad frame".into())).expect("json");
        let value: serde_json::Value = serde_json::from_str(&text).expect("parse");
        assert_eq!(value["status"], "error");
        assert_eq!(value["exit_code"], 13);
        assert_eq!(value["error"], "bad frame");
        assert!(value.get("direction").is_none());
    }
}
