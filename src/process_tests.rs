use std::ffi::OsString;
use std::path::Path;

use super::*;

fn args(list: &[&str]) -> Vec<OsString> {
    list.iter().map(OsString::from).collect()
}

#[test]
fn output_constructors() {
    let ok = CommandOutput::success("fine");
    assert!(ok.success);
    assert_eq!(ok.code, Some(0));

    let bad = CommandOutput::failure(2, "broken");
    assert!(!bad.success);
    assert_eq!(bad.code, Some(2));
    assert_eq!(bad.text, "broken");
}

#[test]
fn missing_program_is_spawn_error() {
    let err = SystemRunner
        .run_captured(Path::new("strict-guard-no-such-program"), &[])
        .unwrap_err();
    assert!(matches!(err, StrictGuardError::Spawn { .. }));
    assert_eq!(err.error_type(), "Spawn");
}

#[cfg(unix)]
#[test]
fn captured_output_joins_stdout_then_stderr() {
    let output = SystemRunner
        .run_captured(
            Path::new("sh"),
            &args(&["-c", "echo out; echo err >&2; exit 3"]),
        )
        .unwrap();
    assert_eq!(output.text, "out\nerr\n");
    assert_eq!(output.code, Some(3));
    assert!(!output.success);
}

#[cfg(unix)]
#[test]
fn discarding_stdout_keeps_stderr() {
    let output = SystemRunner
        .run_discarding_stdout(Path::new("sh"), &args(&["-c", "echo out; echo err >&2"]))
        .unwrap();
    assert_eq!(output.text, "err\n");
    assert!(output.success);
}
