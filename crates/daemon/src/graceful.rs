// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `daemon.graceful`: a zero-byte sentinel the stop command sets before
//! signaling SIGTERM, distinguishing an intentional stop from a crash
//! (spec §3, §4.6).

use crate::env::Paths;

pub fn set(paths: &Paths) -> std::io::Result<()> {
    std::fs::write(&paths.graceful_file, b"")
}

pub fn is_set(paths: &Paths) -> bool {
    paths.graceful_file.exists()
}

pub fn clear(paths: &Paths) -> std::io::Result<()> {
    match std::fs::remove_file(&paths.graceful_file) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "graceful_tests.rs"]
mod tests;
