// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-rig control-socket client and discovery.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rig_wire::{ProtocolError, Request, Response, StatusReport};
use thiserror::Error;
use tokio::io::BufReader;
use tokio::net::UnixStream;

// Timeout configuration (env vars in milliseconds)
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Timeout for one control-socket request.
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("RIG_IPC_TIMEOUT_MS").unwrap_or(rig_wire::DEFAULT_TIMEOUT)
}

/// Timeout for waiting for a freshly created rig to deploy.
pub fn timeout_connect() -> Duration {
    parse_duration_ms("RIG_TIMEOUT_CONNECT_MS").unwrap_or(Duration::from_secs(10))
}

/// Polling interval while waiting for deployment.
pub fn poll_interval() -> Duration {
    parse_duration_ms("RIG_CONNECT_POLL_MS").unwrap_or(Duration::from_millis(50))
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("rig '{0}' is not running")]
    NotRunning(String),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("unexpected response from rig")]
    UnexpectedResponse,
}

/// Client for one rig's control socket.
pub struct RigClient {
    pub name: String,
    socket_path: PathBuf,
}

impl RigClient {
    /// Address the rig by name in the well-known socket directory.
    pub fn for_name(name: &str) -> Self {
        Self { name: name.to_string(), socket_path: rig_core::paths::socket_path(name) }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Liveness probe; false on any failure.
    pub async fn ping(&self) -> bool {
        matches!(self.send(&Request::Ping).await, Ok(response) if response.is_ok())
    }

    pub async fn status(&self) -> Result<StatusReport, ClientError> {
        match self.send(&Request::Status).await? {
            Response::Status(report) => Ok(*report),
            Response::Err { err, .. } => Err(ClientError::Rejected(err)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    pub async fn destroy(&self, force: bool) -> Result<(), ClientError> {
        match self.send(&Request::Destroy { force }).await? {
            Response::Ack { ok: true } => Ok(()),
            Response::Err { err, .. } => Err(ClientError::Rejected(err)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    async fn send(&self, request: &Request) -> Result<Response, ClientError> {
        if !self.socket_path.exists() {
            return Err(ClientError::NotRunning(self.name.clone()));
        }
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|_| ClientError::NotRunning(self.name.clone()))?;
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        let line = rig_wire::encode(request)?;
        rig_wire::write_line(&mut writer, &line, timeout_ipc()).await?;
        let reply = rig_wire::read_line(&mut reader, timeout_ipc()).await?;
        Ok(rig_wire::decode_response(&reply)?)
    }
}

/// Enumerate rig names from sockets in the well-known directory, sorted.
pub fn discover() -> std::io::Result<Vec<String>> {
    let dir = rig_core::paths::run_base();
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let file_name = entry.file_name();
            rig_core::paths::name_from_socket(&file_name.to_string_lossy())
                .map(|n| n.to_string())
        })
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
