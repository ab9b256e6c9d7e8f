//! End-to-end runs of the `osavl` binary over stdin.

#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;

/// Runs the binary on `input`, returning stdout and whether it exited successfully.
fn run(input: impl AsRef<[u8]>) -> (String, bool) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_osavl"))
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn osavl");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_ref())
        .expect("failed to write stdin");

    let output = child.wait_with_output().expect("failed to wait for osavl");
    (String::from_utf8(output.stdout).expect("stdout is UTF-8"), output.status.success())
}

#[test]
fn successful_session() {
    let (stdout, ok) = run("k 8 k 2 k -1\nm 1 m 3\nn 3 n -5 n 100\n");
    assert!(ok);
    assert_eq!(stdout, "-1 8 2 0 3 \n");
}

#[test]
fn empty_input() {
    assert_eq!(run(""), ("\n".to_owned(), true));
}

#[test]
fn error_transcripts() {
    let cases = [
        ("k 1 k 2 m 3", "Wrong index for k-th order statistic. Error. \n"),
        ("m 0", "Wrong index for k-th order statistic. Error. \n"),
        ("k 5 k m 1", "NO number followed. Error.\n"),
        ("k 4 k 4", "You entered a duplicate. Error. \n"),
        ("k 99999999999999999999", "Value out of long long range. Error.\n"),
        ("m 99999999999999999999999", "Value out of size_t range. Error.\n"),
        ("7", "NO k/m/n followed. Error.\n"),
        ("k seven", "Invalid integer argument. Error.\n"),
        ("k 1 n", "Input ended without a following number. Error. \n"),
        ("k 3 m 1 m 2", "3 Wrong index for k-th order statistic. Error. \n"),
    ];

    for (input, expected) in cases {
        let (stdout, ok) = run(input);
        assert!(!ok, "{input:?} should fail");
        assert_eq!(stdout, expected, "{input:?}");
    }
}

#[test]
fn non_utf8_input_keeps_earlier_output() {
    let (stdout, ok) = run(b"k 1 m 1 n \xff\n");
    assert!(!ok);
    assert_eq!(stdout, "1 Invalid integer argument. Error.\n");
}

#[test]
fn large_session_stays_consistent() {
    let mut input = String::new();
    for key in (0..2_000).rev() {
        input.push_str(&format!("k {key} "));
    }
    input.push_str("m 1 m 1000 m 2000 n 1000 n 5000");

    let (stdout, ok) = run(&input);
    assert!(ok);
    assert_eq!(stdout, "0 999 1999 1000 2000 \n");
}
