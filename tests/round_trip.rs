//! End-to-end runs of the `zpipe` binary against files on disk.
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | success                          |
//! |  1   | invalid arguments                |
//! |  3   | file selection error             |
//! | 13   | malformed zstd frame             |
//! | 14   | truncated zstd stream            |
//! | 15   | SHA-256 verification mismatch    |

use std::fs;

use assert_cmd::Command;
use checksums::strong::Sha256;
use compress::{ContentSize, frame_content_size};
use predicates::prelude::*;
use test_support::{compressible_text, pseudo_random_bytes, temp_dir, write_file};

fn zpipe() -> Command {
    let mut command = Command::cargo_bin("zpipe").expect("zpipe binary");
    command.env_remove("ZPIPE_LOG").env_remove("RUST_LOG");
    command
}

#[test]
fn compress_and_restore_through_the_binary() {
    let dir = temp_dir().expect("tempdir");
    let data = compressible_text(300_000);
    let input = write_file(dir.path(), "corpus.txt", &data).expect("write");

    zpipe()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("ZSTD COMPRESSION REPORT"))
        .stdout(predicate::str::contains("PASSED"));

    let frame_path = dir.path().join("corpus.txt.zst");
    let frame = fs::read(&frame_path).expect("read frame");
    assert_eq!(frame_content_size(&frame), ContentSize::Known(data.len() as u64));
    fs::remove_file(&input).expect("remove");

    zpipe()
        .arg("--expect-sha256")
        .arg(Sha256::digest(&data).to_hex())
        .arg(&frame_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ZSTD DECOMPRESSION CHECK"));
    assert_eq!(fs::read(&input).expect("read restored"), data);
}

#[test]
fn ten_byte_file_reports_no_benefit() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "ten.txt", b"AAAAAAAAAA").expect("write");

    zpipe()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Note: File is too small to benefit from compression.",
        ));
}

#[test]
fn mismatching_reference_digest_exits_fifteen() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "x.bin", &compressible_text(4_096)).expect("write");
    zpipe().arg("-q").arg(&input).assert().success();
    fs::remove_file(&input).expect("remove");

    zpipe()
        .arg("--expect-sha256")
        .arg("f".repeat(64))
        .arg(dir.path().join("x.bin.zst"))
        .assert()
        .code(15)
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("integrity verification failed"));
}

#[test]
fn truncated_frame_exits_fourteen_and_cleans_up() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "noise.bin", &pseudo_random_bytes(40_000, 21)).expect("write");
    zpipe().arg("-q").arg(&input).assert().success();

    let frame = fs::read(dir.path().join("noise.bin.zst")).expect("read frame");
    let cut = write_file(dir.path(), "cut.zst", &frame[..frame.len() - 100]).expect("write");

    zpipe()
        .arg(&cut)
        .assert()
        .code(14)
        .stderr(predicate::str::contains("truncated"));
    assert!(!dir.path().join("cut").exists());
}

#[test]
fn malformed_frame_exits_thirteen() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "bogus.zst", b"plain text, not a frame").expect("write");

    zpipe()
        .arg(&input)
        .assert()
        .code(13)
        .stderr(predicate::str::contains("malformed"));
}

#[test]
fn existing_destination_exits_three() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "a.txt", b"abcabcabcabc").expect("write");
    write_file(dir.path(), "a.txt.zst", b"taken").expect("write");

    zpipe()
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("refusing to overwrite"));
    zpipe().arg("--force").arg("-q").arg(&input).assert().success();
}

#[test]
fn json_report_is_machine_readable() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "j.txt", &compressible_text(10_000)).expect("write");

    let output = zpipe().arg("--json").arg(&input).output().expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.trim_start().starts_with('{'));
    assert!(stdout.contains("\"benefit\": \"reduced\""));
    assert!(stdout.contains("\"verification\": \"PASSED\""));
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "v.txt", &compressible_text(1_000)).expect("write");

    zpipe()
        .arg("-vv")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("zpipe::pipeline").or(predicate::str::contains("finished")));
}

#[cfg(not(feature = "multithread"))]
#[test]
fn threads_without_multithread_exit_four() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "t.txt", b"threads threads").expect("write");
    zpipe().args(["-T", "2"]).arg(&input).assert().code(4);
}

#[cfg(feature = "multithread")]
#[test]
fn threads_produce_a_verified_frame() {
    let dir = temp_dir().expect("tempdir");
    let input = write_file(dir.path(), "t.txt", &compressible_text(2 << 20)).expect("write");
    zpipe()
        .args(["-T", "2"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("PASSED"));
}
