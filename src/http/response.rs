//! Response builder and sender.
//!
//! Builds a fixed header order into one buffer, sent with
//! [`crate::io::send_all`], followed by an inline body (if any) and then a
//! zero-copy file transfer (if set).

use crate::config::SERVER_HEADER_LINE;
use crate::http::types::StatusCode;
use crate::io::{send_all, send_file};
use std::fs::File;
use std::io;
use std::net::TcpStream;
use std::time::SystemTime;

/// A file to be streamed to the client after any inline body, via
/// `sendfile(2)`.
#[derive(Debug, Clone)]
pub struct ZeroCopy {
    pub path: std::path::PathBuf,
    pub size: u64,
    pub mtime: SystemTime,
}

/// A response under construction.
#[derive(Debug, Default)]
pub struct Response {
    pub code: Option<StatusCode>,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    pub zero_copy: Option<ZeroCopy>,
}

impl Response {
    pub fn new(code: StatusCode) -> Self {
        Response {
            code: Some(code),
            content_type: None,
            body: Vec::new(),
            zero_copy: None,
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code.unwrap_or(StatusCode::InternalServerError)
    }
}

/// Sends `response` to `conn`: header block, then inline body, then
/// zero-copy file transfer. Any step failing aborts the send; the caller
/// closes the connection on failure.
pub fn send(response: &Response, conn: &mut TcpStream) -> io::Result<()> {
    let content_length = match &response.zero_copy {
        Some(zc) => zc.size,
        None => response.body.len() as u64,
    };

    let mut headers = Vec::with_capacity(256);
    let code = response.code();
    headers.extend_from_slice(
        format!("HTTP/1.1 {} {}\r\n", code.code(), code.reason()).as_bytes(),
    );
    headers.extend_from_slice(b"Connection: keep-alive\r\n");
    headers.extend_from_slice(SERVER_HEADER_LINE.as_bytes());
    headers.extend_from_slice(b"\r\n");

    if let Some(zc) = &response.zero_copy {
        let date = httpdate::fmt_http_date(zc.mtime);
        headers.extend_from_slice(format!("Date: {date}\r\n").as_bytes());
    }

    if let Some(content_type) = response.content_type {
        headers.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    }

    headers.extend_from_slice(format!("Content-Length: {content_length}\r\n").as_bytes());
    headers.extend_from_slice(b"\r\n");

    send_all(conn, &headers)?;

    if !response.body.is_empty() {
        send_all(conn, &response.body)?;
    }

    if let Some(zc) = &response.zero_copy {
        let file = File::open(&zc.path)?;
        send_file(conn, &file, zc.size)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;

    #[test]
    fn header_block_has_the_fixed_order_and_terminates_with_blank_line() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let mut response = Response::new(StatusCode::Ok);
        response.content_type = Some("text/html");
        response.body = b"<html></html>".to_vec();

        let writer = std::thread::spawn(move || {
            let mut conn = TcpStream::connect(addr).unwrap();
            send(&response, &mut conn).unwrap();
        });

        let (mut server_side, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        server_side.read_to_end(&mut received).unwrap();
        writer.join().unwrap();

        let text = String::from_utf8(received).unwrap();
        let mut lines = text.split("\r\n");
        assert_eq!(lines.next().unwrap(), "HTTP/1.1 200 OK");
        assert_eq!(lines.next().unwrap(), "Connection: keep-alive");
        assert_eq!(lines.next().unwrap(), SERVER_HEADER_LINE);
        assert_eq!(lines.next().unwrap(), "Content-Type: text/html");
        assert_eq!(lines.next().unwrap(), "Content-Length: 13");
        assert_eq!(lines.next().unwrap(), "");
        assert!(text.ends_with("<html></html>"));
    }

    #[test]
    fn zero_copy_response_carries_a_date_header_and_no_inline_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"hello").unwrap();
        let meta = std::fs::metadata(&path).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let mut response = Response::new(StatusCode::Ok);
        response.content_type = Some("text/plain");
        response.zero_copy = Some(ZeroCopy {
            path: path.clone(),
            size: meta.len(),
            mtime: meta.modified().unwrap(),
        });

        let writer = std::thread::spawn(move || {
            let mut conn = TcpStream::connect(addr).unwrap();
            send(&response, &mut conn).unwrap();
        });

        let (mut server_side, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        server_side.read_to_end(&mut received).unwrap();
        writer.join().unwrap();

        let text = String::from_utf8(received).unwrap();
        assert!(text.contains("Date: "));
        assert!(text.ends_with("hello"));
    }
}
