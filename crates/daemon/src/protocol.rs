// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire envelope (spec §6) for the local transport between `orc` and the
//! running `orcd` supervisor. Used only by the commands that need the live
//! daemon's state (`monitor status|stop|pause`) — every other command runs
//! its operation directly against the multiplexer, daemon-free.
//!
//! Grounded on the teacher's length-prefixed JSON request/response framing,
//! narrowed to the handful of monitor-control commands this spec needs —
//! not a general-purpose RPC surface.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Length of the frame-size prefix, matching the teacher's wire format.
pub const LENGTH_PREFIX_BYTES: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub options: std::collections::HashMap<String, Value>,
}

impl Request {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(), args: Vec::new(), options: std::collections::HashMap::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub command: String,
    pub args: Vec<String>,
    pub result: Value,
    pub raw_output: String,
    pub execution_time_ms: u64,
    pub error: Option<String>,
    pub error_type: Option<String>,
}

impl Response {
    pub fn ok(command: &Request, result: Value, raw_output: String, elapsed: Duration) -> Self {
        Self {
            success: true,
            command: command.command.clone(),
            args: command.args.clone(),
            result,
            raw_output,
            execution_time_ms: elapsed.as_millis() as u64,
            error: None,
            error_type: None,
        }
    }

    pub fn err(command: &Request, error: &orc_core::OrcError, elapsed: Duration) -> Self {
        Self {
            success: false,
            command: command.command.clone(),
            args: command.args.clone(),
            result: Value::Null,
            raw_output: String::new(),
            execution_time_ms: elapsed.as_millis() as u64,
            error: Some(error.to_string()),
            error_type: Some(error.error_type().to_string()),
        }
    }
}

/// Writes `value` as a length-prefixed JSON frame.
pub async fn write_frame<W: tokio::io::AsyncWriteExt + Unpin>(
    writer: &mut W,
    value: &impl Serialize,
) -> std::io::Result<()> {
    let body = serde_json::to_vec(value)?;
    writer.write_all(&(body.len() as u32).to_be_bytes()).await?;
    writer.write_all(&body).await
}

/// Reads one length-prefixed JSON frame.
pub async fn read_frame<R: tokio::io::AsyncReadExt + Unpin, T: for<'de> Deserialize<'de>>(
    reader: &mut R,
) -> std::io::Result<T> {
    let mut len_buf = [0u8; LENGTH_PREFIX_BYTES];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf) as usize;
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;
    serde_json::from_slice(&body).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
