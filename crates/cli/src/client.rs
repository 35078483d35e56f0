// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin client for the `monitor status|stop|pause` commands: the only ones
//! that need the live Supervisor's state rather than talking to the
//! multiplexer directly.
//!
//! Grounded on `oj-cli::client::DaemonClient`'s connect/send/read shape,
//! narrowed to this spec's three control commands.

use std::time::Duration;

use orc_daemon::protocol::{read_frame, write_frame, Request, Response};
use orc_daemon::Paths;
use thiserror::Error;
use tokio::net::UnixStream;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("daemon not running")]
    NotRunning,
    #[error("connection timed out")]
    Timeout,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct DaemonClient {
    socket_path: std::path::PathBuf,
}

impl DaemonClient {
    pub fn new(paths: &Paths) -> Self {
        Self { socket_path: paths.root.join("daemon.sock") }
    }

    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        if !self.socket_path.exists() {
            return Err(ClientError::NotRunning);
        }

        let mut stream = tokio::time::timeout(CONNECT_TIMEOUT, UnixStream::connect(&self.socket_path))
            .await
            .map_err(|_| ClientError::Timeout)??;

        write_frame(&mut stream, &request).await?;
        let response = read_frame(&mut stream).await?;
        Ok(response)
    }
}
