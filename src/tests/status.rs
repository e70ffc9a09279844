//! Tests for Status enum and related functionality.

use crate::*;

#[test]
fn test_status_default_is_not_run() {
    assert_eq!(Status::default(), Status::NotRun);
}

#[test]
fn test_status_from_exit_code_zero_passes() {
    assert_eq!(Status::from_exit_code(Some(0)), Status::Passed);
}

#[test]
fn test_status_from_exit_code_one_fails() {
    assert_eq!(Status::from_exit_code(Some(1)), Status::Failed);
}

#[test]
fn test_status_from_exit_code_other_codes_fail() {
    // pytest uses 2..=5 for interrupted/internal/usage/no-tests; all are failures here
    for code in [2, 3, 4, 5, -1, 127] {
        assert_eq!(Status::from_exit_code(Some(code)), Status::Failed, "code {code}");
    }
}

#[test]
fn test_status_from_signal_fails() {
    assert_eq!(Status::from_exit_code(None), Status::Failed);
}

#[test]
fn test_status_display() {
    assert_eq!(Status::NotRun.to_string(), "not-run");
    assert_eq!(Status::Passed.to_string(), "passed");
    assert_eq!(Status::Failed.to_string(), "failed");
}
