use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use logging::{VerbosityConfig, init_tracing};
use pipeline::{ExitCode, PipelineError, PipelineResult};
use tracing::debug;

mod arguments;
mod command_builder;
mod help;
mod options;
mod report;

#[cfg(test)]
mod tests;

use arguments::{PROGRAM_NAME, ParsedArgs, parse_args};
use help::{USAGE_LINE, help_text, version_text};
use options::{check_reference, pipeline_config};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller. On success, `0` is returned.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let rendered = error.to_string();
            let _ = write!(stderr, "{PROGRAM_NAME}: {}", rendered.trim_start_matches("error: "));
            if !rendered.ends_with('\n') {
                let _ = writeln!(stderr);
            }
            ExitCode::Syntax.as_i32()
        }
    }
}

/// Converts a numeric status into [`std::process::ExitCode`], clamping it to
/// the range a process can report.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        if stdout.write_all(help_text().as_bytes()).is_err() {
            return ExitCode::FileIo.as_i32();
        }
        return ExitCode::Ok.as_i32();
    }

    if parsed.show_version {
        if stdout.write_all(version_text().as_bytes()).is_err() {
            return ExitCode::FileIo.as_i32();
        }
        return ExitCode::Ok.as_i32();
    }

    let file = match parsed.files.as_slice() {
        [file] => PathBuf::from(file),
        [] => {
            let _ = write!(stderr, "{PROGRAM_NAME}: missing FILE operand\n{USAGE_LINE}");
            return ExitCode::Syntax.as_i32();
        }
        [_, extra, ..] => {
            let _ = writeln!(
                stderr,
                "{PROGRAM_NAME}: unexpected operand '{}'; exactly one FILE is accepted",
                extra.to_string_lossy()
            );
            let _ = write!(stderr, "{USAGE_LINE}");
            return ExitCode::Syntax.as_i32();
        }
    };

    let config = match pipeline_config(&parsed).and_then(|config| {
        check_reference(&config, &file)?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            return ExitCode::Syntax.as_i32();
        }
    };

    init_tracing(VerbosityConfig::from_flags(parsed.quiet, parsed.verbose));
    debug!(target: "zpipe::cli", ?config, file = %file.display(), "configuration");

    let show_text = !parsed.quiet && !parsed.json;

    let outcome = pipeline::run(&file, &config);
    if parsed.json {
        return emit_json(&outcome, stdout, stderr);
    }

    match outcome {
        Ok(result) => {
            if show_text && emit_text(&result, stdout).is_err() {
                return ExitCode::FileIo.as_i32();
            }
            ExitCode::Ok.as_i32()
        }
        Err(error) => {
            let code = error.exit_code();
            if let Some(result) = error.result() {
                if !parsed.quiet {
                    let _ = emit_text(result, stdout);
                }
            }
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error} ({code})");
            code.as_i32()
        }
    }
}

fn emit_text<Out: Write>(result: &PipelineResult, stdout: &mut Out) -> std::io::Result<()> {
    stdout.write_all(report::render_text(result).as_bytes())?;
    stdout.flush()
}

fn emit_json<Out, Err>(
    outcome: &Result<PipelineResult, PipelineError>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    Out: Write,
    Err: Write,
{
    let (code, result, error) = match outcome {
        Ok(result) => (ExitCode::Ok, Some(result), None),
        Err(error) => (error.exit_code(), error.result(), Some(error.to_string())),
    };
    match report::render_json(code, result, error) {
        Ok(text) => {
            if stdout.write_all(text.as_bytes()).is_err() {
                return ExitCode::FileIo.as_i32();
            }
            code.as_i32()
        }
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: failed to render JSON report: {error}");
            ExitCode::Internal.as_i32()
        }
    }
}
