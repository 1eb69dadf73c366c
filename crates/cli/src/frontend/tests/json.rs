use std::ffi::OsStr;

use test_support::{temp_dir, write_file};

use super::common::*;

fn parse(bytes: Vec<u8>) -> serde_json::Value {
    serde_json::from_slice(&bytes).expect("valid JSON")
}

#[test]
fn json_success_document() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "ten.txt", b"AAAAAAAAAA").expect("write");

    let (code, stdout, _) =
        run_with_args([OsStr::new(PROGRAM_NAME), OsStr::new("--json"), input.as_os_str()]);
    assert_eq!(code, 0);
    let value = parse(stdout);
    assert_eq!(value["status"], "ok");
    assert_eq!(value["exit_code"], 0);
    assert_eq!(value["direction"], "compress");
    assert_eq!(value["original_size"], 10);
    assert_eq!(value["benefit"], "no_benefit");
    assert_eq!(value["verification"], "PASSED");
    assert_eq!(value["verified"], true);
    assert_eq!(value["source_digest"], value["output_digest"]);
}

#[test]
fn json_failure_document() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "junk.zst", b"definitely not zstd").expect("write");

    let (code, stdout, stderr) =
        run_with_args([OsStr::new(PROGRAM_NAME), OsStr::new("--json"), input.as_os_str()]);
    assert_eq!(code, 13);
    assert!(stderr.is_empty());
    let value = parse(stdout);
    assert_eq!(value["status"], "error");
    assert_eq!(value["exit_code"], 13);
    assert!(value["error"].as_str().expect("error text").contains("malformed"));
}

#[test]
fn json_ignores_quiet() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "q.txt", b"json json json json").expect("write");

    let (code, stdout, _) = run_with_args([
        OsStr::new(PROGRAM_NAME),
        OsStr::new("--json"),
        OsStr::new("-q"),
        input.as_os_str(),
    ]);
    assert_eq!(code, 0);
    assert_eq!(parse(stdout)["status"], "ok");
}
