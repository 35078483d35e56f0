// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-text vs `--json` rendering and exit-code mapping (spec §6).

use orc_core::OrcError;
use serde::Serialize;
use serde_json::json;

/// Prints `value` as pretty JSON when `as_json`, else calls `human` for text
/// output. Both paths see the same data — `human` need not re-derive it.
pub fn emit<T: Serialize>(as_json: bool, value: &T, human: impl FnOnce(&T) -> String) {
    if as_json {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("error: failed to serialize output: {e}"),
        }
    } else {
        println!("{}", human(value));
    }
}

/// Renders a command failure per spec §7's envelope (`error`, `error_type`)
/// and exits with `error.exit_code()`.
pub fn fail(as_json: bool, error: &OrcError) -> ! {
    if as_json {
        let body = json!({
            "success": false,
            "error": error.to_string(),
            "error_type": error.error_type(),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("error: {error}");
    }
    std::process::exit(error.exit_code());
}
