// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};

use crate::{
    decode_request, decode_response, encode, read_line, write_line, ProtocolError, Request,
    Response, MAX_LINE,
};

const TIMEOUT: Duration = Duration::from_secs(1);

#[tokio::test]
async fn request_roundtrip_over_duplex() {
    let (client, server) = tokio::io::duplex(4096);
    let (server_read, _server_write) = tokio::io::split(server);
    let (_client_read, mut client_write) = tokio::io::split(client);

    let line = encode(&Request::Destroy { force: true }).unwrap();
    write_line(&mut client_write, &line, TIMEOUT).await.unwrap();

    let mut reader = BufReader::new(server_read);
    let received = read_line(&mut reader, TIMEOUT).await.unwrap();
    assert_eq!(decode_request(&received).unwrap(), Request::Destroy { force: true });
}

#[tokio::test]
async fn response_roundtrip_over_duplex() {
    let (client, server) = tokio::io::duplex(4096);
    let (client_read, _w) = tokio::io::split(client);
    let (_r, mut server_write) = tokio::io::split(server);

    let line = encode(&Response::err("unknown op")).unwrap();
    write_line(&mut server_write, &line, TIMEOUT).await.unwrap();

    let mut reader = BufReader::new(client_read);
    let received = read_line(&mut reader, TIMEOUT).await.unwrap();
    assert_eq!(decode_response(&received).unwrap(), Response::err("unknown op"));
}

#[tokio::test]
async fn eof_is_connection_closed() {
    let (client, server) = tokio::io::duplex(64);
    drop(client);
    let (server_read, _w) = tokio::io::split(server);
    let mut reader = BufReader::new(server_read);
    match read_line(&mut reader, TIMEOUT).await {
        Err(ProtocolError::ConnectionClosed) => {}
        other => panic!("expected ConnectionClosed, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn silent_peer_times_out() {
    let (_client, server) = tokio::io::duplex(64);
    let (server_read, _w) = tokio::io::split(server);
    let mut reader = BufReader::new(server_read);
    match read_line(&mut reader, Duration::from_millis(50)).await {
        Err(ProtocolError::Timeout) => {}
        other => panic!("expected Timeout, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn oversized_line_is_rejected() {
    let (client, server) = tokio::io::duplex(MAX_LINE * 2 + 64);
    let (_r, mut client_write) = tokio::io::split(client);
    let big = format!("{}\n", "x".repeat(MAX_LINE + 1));
    client_write.write_all(big.as_bytes()).await.unwrap();
    client_write.flush().await.unwrap();

    let (server_read, _w) = tokio::io::split(server);
    let mut reader = BufReader::new(server_read);
    match read_line(&mut reader, TIMEOUT).await {
        Err(ProtocolError::LineTooLong { .. }) => {}
        other => panic!("expected LineTooLong, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn decode_trims_trailing_newline() {
    assert_eq!(decode_request("{\"op\":\"ping\"}\n").unwrap(), Request::Ping);
}

#[test]
fn malformed_line_is_json_error() {
    assert!(matches!(decode_request("not json"), Err(ProtocolError::Json(_))));
}
