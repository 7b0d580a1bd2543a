// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line framing for the control-socket protocol.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

use crate::{Request, Response};

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line too long: {size} bytes (max {max})")]
    LineTooLong { size: usize, max: usize },

    #[error("connection closed")]
    ConnectionClosed,

    #[error("timeout")]
    Timeout,
}

/// Maximum accepted line length (64 KB).
pub const MAX_LINE: usize = 64 * 1024;

/// Default IPC timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Encode a message as one JSON line (newline included).
pub fn encode<T: Serialize>(msg: &T) -> Result<String, ProtocolError> {
    let mut line = serde_json::to_string(msg)?;
    if line.len() > MAX_LINE {
        return Err(ProtocolError::LineTooLong { size: line.len(), max: MAX_LINE });
    }
    line.push('\n');
    Ok(line)
}

/// Decode a request line. A JSON syntax failure and an unknown `op` both
/// surface as [`ProtocolError::Json`]; callers that need to distinguish
/// them (the listener's `unknown op` answer) parse to a
/// [`serde_json::Value`] first.
pub fn decode_request(line: &str) -> Result<Request, ProtocolError> {
    decode(line)
}

/// Decode a response line.
pub fn decode_response(line: &str) -> Result<Response, ProtocolError> {
    decode(line)
}

fn decode<T: DeserializeOwned>(line: &str) -> Result<T, ProtocolError> {
    Ok(serde_json::from_str(line.trim_end())?)
}

/// Read one line with a timeout. EOF before any byte is
/// [`ProtocolError::ConnectionClosed`].
pub async fn read_line<R>(reader: &mut R, timeout: Duration) -> Result<String, ProtocolError>
where
    R: AsyncBufReadExt + Unpin,
{
    let mut line = String::new();
    let n = tokio::time::timeout(timeout, reader.read_line(&mut line))
        .await
        .map_err(|_| ProtocolError::Timeout)??;
    if n == 0 {
        return Err(ProtocolError::ConnectionClosed);
    }
    if line.len() > MAX_LINE {
        return Err(ProtocolError::LineTooLong { size: line.len(), max: MAX_LINE });
    }
    Ok(line)
}

/// Write one pre-encoded line with a timeout.
pub async fn write_line<W>(writer: &mut W, line: &str, timeout: Duration) -> Result<(), ProtocolError>
where
    W: AsyncWriteExt + Unpin,
{
    tokio::time::timeout(timeout, async {
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await
    })
    .await
    .map_err(|_| ProtocolError::Timeout)??;
    Ok(())
}
