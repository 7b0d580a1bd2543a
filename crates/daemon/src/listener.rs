// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-socket listener.
//!
//! Runs in a spawned task, accepting connections and answering
//! line-delimited JSON requests without blocking the supervisor. Destroy
//! requests are acknowledged first, then shutdown is signalled.

use std::sync::Arc;

use rig_wire::{encode, ProtocolError, Request, Response};
use tokio::io::BufReader;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::env::ipc_timeout;
use crate::status::Shared;

/// Shared context for request handlers.
pub struct ListenCtx {
    pub shared: Arc<Shared>,
    /// Signalled once on destroy; the supervisor tears down.
    pub shutdown: Arc<Notify>,
    /// Cancelled on force-destroy; kills in-flight action subprocesses.
    pub force: CancellationToken,
}

/// Listener task for accepting control connections.
pub struct Listener {
    unix: UnixListener,
    ctx: Arc<ListenCtx>,
}

impl Listener {
    pub fn new(unix: UnixListener, ctx: Arc<ListenCtx>) -> Self {
        Self { unix, ctx }
    }

    /// Accept loop; runs until the task is aborted at rig teardown.
    pub async fn run(self) {
        loop {
            match self.unix.accept().await {
                Ok((stream, _)) => {
                    let ctx = Arc::clone(&self.ctx);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &ctx).await {
                            log_connection_error(e);
                        }
                    });
                }
                Err(e) => error!("accept error: {}", e),
            }
        }
    }
}

fn log_connection_error(e: ProtocolError) {
    match e {
        ProtocolError::ConnectionClosed => debug!("client disconnected"),
        ProtocolError::Timeout => warn!("connection timeout"),
        other => warn!("connection error: {}", other),
    }
}

/// Serve one connection: any number of request lines until EOF.
///
/// A malformed line is answered with `{"ok":false}` and the connection is
/// closed; a well-formed line with an unrecognized op is answered with
/// `unknown op` and the connection stays open.
async fn handle_connection(stream: UnixStream, ctx: &ListenCtx) -> Result<(), ProtocolError> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    loop {
        let line = match rig_wire::read_line(&mut reader, ipc_timeout()).await {
            Ok(line) => line,
            Err(ProtocolError::ConnectionClosed) => return Ok(()),
            Err(e) => return Err(e),
        };

        let (response, close) = match serde_json::from_str::<serde_json::Value>(line.trim_end()) {
            Err(e) => (Response::err(format!("malformed request: {}", e)), true),
            Ok(value) => match serde_json::from_value::<Request>(value) {
                Err(_) => (Response::err("unknown op"), false),
                Ok(request) => (handle_request(request, ctx), false),
            },
        };

        rig_wire::write_line(&mut writer, &encode(&response)?, ipc_timeout()).await?;
        if close {
            return Ok(());
        }
    }
}

fn handle_request(request: Request, ctx: &ListenCtx) -> Response {
    match request {
        Request::Ping => Response::ok(),

        Request::Status => Response::Status(Box::new(ctx.shared.report())),

        Request::Destroy { force } => {
            if !ctx.shared.mark_destroyed() {
                // Idempotent destroy: the first one wins, later ones see
                // a rig that is already gone.
                return Response::err("not found");
            }
            debug!(force, "destroy acknowledged");
            if force {
                ctx.force.cancel();
            }
            ctx.shutdown.notify_one();
            Response::ok()
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
