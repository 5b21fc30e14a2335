//! Minimal HTTP/1.1 server for responses wiremock cannot produce.
//!
//! Serves one canned response to every request: optionally without a
//! Content-Length header (body ends when the connection closes), with a
//! declared length longer than the body, or stalling after the body until the
//! client hangs up.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// The canned response.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// Bytes written after the headers.
    pub body: Vec<u8>,
    /// Value of the Content-Length header; `None` omits the header.
    pub declared_length: Option<u64>,
    /// Keep the connection open after the body instead of closing it.
    pub stall_after_body: bool,
}

impl RawResponse {
    /// Complete body with an honest Content-Length.
    pub fn with_length(body: Vec<u8>) -> Self {
        Self {
            declared_length: Some(body.len() as u64),
            body,
            stall_after_body: false,
        }
    }

    /// Body delimited by connection close, no Content-Length.
    pub fn without_length(body: Vec<u8>) -> Self {
        Self {
            body,
            declared_length: None,
            stall_after_body: false,
        }
    }

    /// Sends `prefix` of a `declared_length` body, then stops sending.
    pub fn stalling(prefix: Vec<u8>, declared_length: u64) -> Self {
        Self {
            body: prefix,
            declared_length: Some(declared_length),
            stall_after_body: true,
        }
    }

    /// Sends `prefix` of a `declared_length` body, then closes the connection.
    pub fn truncated(prefix: Vec<u8>, declared_length: u64) -> Self {
        Self {
            body: prefix,
            declared_length: Some(declared_length),
            stall_after_body: false,
        }
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(response: RawResponse) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let response = Arc::new(response);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let response = Arc::clone(&response);
            thread::spawn(move || handle(stream, &response));
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn handle(mut stream: TcpStream, response: &RawResponse) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    if !read_request_head(&mut stream) {
        return;
    }

    let mut head = String::from("HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\n");
    match response.declared_length {
        Some(length) => head.push_str(&format!("Content-Length: {length}\r\n")),
        None => head.push_str("Connection: close\r\n"),
    }
    head.push_str("\r\n");

    if stream.write_all(head.as_bytes()).is_err() || stream.write_all(&response.body).is_err() {
        return;
    }
    let _ = stream.flush();

    if response.stall_after_body {
        // Hold the socket open until the client goes away.
        let _ = stream.set_read_timeout(None);
        let mut sink = [0u8; 1024];
        while matches!(stream.read(&mut sink), Ok(n) if n > 0) {}
    }
}

/// Reads until the blank line ending the request head.
fn read_request_head(stream: &mut TcpStream) -> bool {
    let mut received = Vec::new();
    let mut buf = [0u8; 1024];
    while !received.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return false,
            Ok(n) => received.extend_from_slice(&buf[..n]),
        }
    }
    true
}
