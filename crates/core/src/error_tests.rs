// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn bad_argument_exits_2() {
    assert_eq!(OrcError::BadArgument("x".into()).exit_code(), 2);
}

#[test]
fn not_found_exits_2() {
    assert_eq!(OrcError::NotFound("x".into()).exit_code(), 2);
}

#[test]
fn transport_error_exits_1() {
    assert_eq!(OrcError::TransportError("x".into()).exit_code(), 1);
}

#[test]
fn error_type_is_stable_for_json_envelope() {
    assert_eq!(OrcError::AlreadyRunning { pid: 42 }.error_type(), "already_running");
    assert_eq!(
        OrcError::SubmissionFailed { chunk_index: 0, methods_tried: vec![] }.error_type(),
        "submission_failed"
    );
}
