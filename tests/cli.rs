#![cfg(feature = "video")]

use std::io::Write;
use std::process::{Command, Output};

fn linemark(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linemark"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

/// 所有失败都以 -1 退出
fn assert_failed(output: &Output, message: &str) {
    assert!(!output.status.success());
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(message), "stderr: {stderr}");
}

fn plan_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{text}").unwrap();
    file
}

#[test]
fn test_missing_arguments() {
    assert_failed(&linemark(&[]), "Wrong usage");
    assert_failed(&linemark(&["plans/sample.txt"]), "Wrong usage");
}

#[test]
fn test_help() {
    assert!(linemark(&["--help"]).status.success());
}

#[test]
fn test_unreadable_plan() {
    let output = linemark(&["plans/does_not_exist.txt", "video.avi"]);
    assert_failed(&output, "Could not open plan file");
}

#[test]
fn test_bad_plan() {
    let plan = plan_file("S:48.378986/16.8257190\nE:48.3789140/16.8257550");
    let path = plan.path().to_str().unwrap();
    assert_failed(&linemark(&[path, "video.avi"]), "too few significant digits");

    let plan = plan_file("S:0.00000000/0.00000000\nE:1000000000000000000000000.0/0.00000000");
    let path = plan.path().to_str().unwrap();
    assert_failed(&linemark(&[path, "video.avi"]), "outside the valid GPS range");
}

#[test]
fn test_unreadable_video() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("missing.avi");
    let output = linemark(&["plans/sample.txt", video.to_str().unwrap(), "--headless"]);
    assert!(!output.status.success());
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255));
}

#[test]
fn test_marks_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("marks.csv");
    let output = linemark(&[
        "plans/sample.txt",
        "video.avi",
        "--marks-csv",
        csv.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let text = std::fs::read_to_string(&csv).unwrap();
    assert!(text.starts_with("latitude;longitude\n"));
    assert!(text.lines().count() > 1);
}
