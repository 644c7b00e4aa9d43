use std::io::Write;
use std::process::{Command, Output, Stdio};

use crate::support::fixture;

fn run_decodegen(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_decodegen"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("DECODEGEN_TARGET")
        .env_remove("DECODEGEN_DUPLICATES")
        .env_remove("DECODEGEN_STRAY_BITS")
        .env_remove("DECODEGEN_UNKNOWN_LAYOUT")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn decodegen");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for decodegen")
}

#[test]
fn generates_zig_from_stdin_without_flags() {
    let output = run_decodegen(&[], &fixture());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.starts_with("// Generated by decodegen. Do not edit.\n"));
    assert!(stdout.contains("const Instruction = enum {"));
    assert!(!stdout.contains("ecall"));
}

#[test]
fn classification_warnings_go_to_stderr_only() {
    let output = run_decodegen(&[], &fixture());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("instruction 'slli' has no canonical layout"));
    assert!(!stdout.contains("no canonical layout"));
}

#[test]
fn target_flag_selects_rust() {
    let output = run_decodegen(&["--target", "rust"], &fixture());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pub enum Instruction {"));
    assert!(stdout.contains("pub const ENCODINGS: &[DecodingTable] = &["));
}

#[test]
fn malformed_input_fails_without_output() {
    let output = run_decodegen(&[], "{ \"add\": { \"mask\": ");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse error"), "stderr: {stderr}");
}

#[test]
fn duplicate_matches_fail_unless_first_wins() {
    let src = r#"{
        "a": { "mask": "0x7f", "match": "0x33", "variable_fields": ["rd", "rs1", "rs2"] },
        "b": { "mask": "0x7f", "match": "0x33", "variable_fields": ["rd", "rs1", "rs2"] }
    }"#;
    let rejected = run_decodegen(&[], src);
    assert!(!rejected.status.success());
    assert!(rejected.stdout.is_empty());
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("ambiguous decode table"));

    let accepted = run_decodegen(&["--duplicates", "first-wins"], src);
    assert!(accepted.status.success());
    let stdout = String::from_utf8_lossy(&accepted.stdout);
    assert!(stdout.contains(".instruction = .a }"));
    assert!(!stdout.contains(".instruction = .b }"));
}

#[test]
fn fatal_diagnostics_are_reported_once() {
    let ambiguous = r#"{
        "a": { "mask": "0x7f", "match": "0x33", "variable_fields": ["rd", "rs1", "rs2"] },
        "b": { "mask": "0x7f", "match": "0x33", "variable_fields": ["rd", "rs1", "rs2"] }
    }"#;
    let output = run_decodegen(&[], ambiguous);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("is claimed by a, b").count(), 1, "stderr: {stderr}");

    let stray = r#"{ "odd": { "mask": "0x707f", "match": "0x10013", "variable_fields": ["rd", "rs1", "imm12"] } }"#;
    let output = run_decodegen(&[], stray);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("outside mask").count(), 1, "stderr: {stderr}");
}
