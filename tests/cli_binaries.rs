use std::process::Command;

fn binary_output(args: &[&str]) -> std::process::Output {
    let path = env!("CARGO_BIN_EXE_zpipe");
    Command::new(path)
        .args(args)
        .output()
        .unwrap_or_else(|error| panic!("failed to run {path}: {error}"))
}

#[test]
fn zpipe_help_lists_usage() {
    let output = binary_output(&["--help"]);
    assert!(output.status.success(), "--help should succeed");
    assert!(
        output.stderr.is_empty(),
        "help output should not write to stderr"
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert!(stdout.contains("Usage: zpipe"));
}

#[test]
fn zpipe_without_operands_shows_usage() {
    let output = binary_output(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("Usage:"));
}

#[test]
fn zpipe_version_reports_package_version() {
    let output = binary_output(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert!(stdout.starts_with(concat!("zpipe ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn zpipe_rejects_unknown_flag() {
    let output = binary_output(&["--definitely-not-a-flag"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("--definitely-not-a-flag"));
}
