//! Reads one HTTP/1.1 request line plus headers off a connection.
//!
//! When this is not the connection's first request, the read is preceded
//! by an idle-wait via `poll(2)` so a kept-alive connection with no further
//! traffic is reaped instead of blocking a worker forever. Bytes are fed
//! into a [`LineParser`] until headers are complete or rejected.

use crate::config::{KEEP_ALIVE_TIMEOUT, RECV_BUF_SIZE};
use crate::http::line_parser::LineParser;
use std::io::{self, ErrorKind, Read};
use std::net::TcpStream;
use std::os::unix::io::AsRawFd;

/// A parsed request line plus the one header this server interprets.
#[derive(Debug, Default, Clone)]
pub struct Request {
    pub method: Vec<u8>,
    pub path: Vec<u8>,
    pub query: Option<Vec<u8>>,
    pub keep_alive: bool,
}

/// Outcome of [`receive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Disconnected,
    Error,
    BadRequest,
}

/// Reads one HTTP/1.1 request off `conn`.
///
/// `keep_alive_in` is true when this is not the first request served on
/// this connection; in that case the read is preceded by an idle-wait of
/// up to [`KEEP_ALIVE_TIMEOUT`] via `poll(2)`.
pub fn receive(conn: &mut TcpStream, keep_alive_in: bool) -> (Outcome, Request) {
    let mut request = Request::default();
    let mut parser = LineParser::new();
    let mut buf = [0u8; RECV_BUF_SIZE];

    loop {
        if keep_alive_in {
            match wait_readable(conn, KEEP_ALIVE_TIMEOUT) {
                PollResult::Ready => {}
                PollResult::Timeout => return (Outcome::Disconnected, request),
                PollResult::Error => return (Outcome::Error, request),
            }
        }

        let n = match conn.read(&mut buf) {
            Ok(0) => return (Outcome::Disconnected, request),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted || e.kind() == ErrorKind::WouldBlock => {
                continue
            }
            Err(_) => return (Outcome::Error, request),
        };

        let consumed = parser.consume(&buf[..n], |line_num, line| {
            if line_num == 0 {
                parse_request_line(line, &mut request)
            } else {
                parse_header_line(line, &mut request);
                true
            }
        });
        if consumed != n {
            parser.invalid = true;
        }
        if parser.complete || parser.invalid {
            break;
        }
    }

    if parser.invalid {
        (Outcome::BadRequest, request)
    } else {
        (Outcome::Success, request)
    }
}

enum PollResult {
    Ready,
    Timeout,
    Error,
}

fn wait_readable(conn: &TcpStream, timeout: std::time::Duration) -> PollResult {
    let mut pfd = libc::pollfd {
        fd: conn.as_raw_fd(),
        events: libc::POLLIN,
        revents: 0,
    };
    let timeout_ms = timeout.as_millis() as libc::c_int;
    loop {
        let ret = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
        match ret {
            -1 => {
                let err = io::Error::last_os_error();
                if err.kind() == ErrorKind::Interrupted {
                    continue;
                }
                return PollResult::Error;
            }
            0 => return PollResult::Timeout,
            _ => return PollResult::Ready,
        }
    }
}

/// Splits `METHOD SP target` on the first space, then `target` on the first
/// `?` into path and query. Any deviation is invalid.
fn parse_request_line(line: &[u8], out: &mut Request) -> bool {
    let Some(space) = line.iter().position(|&b| b == b' ') else {
        return false;
    };
    let method = &line[..space];
    if method.is_empty() {
        return false;
    }
    let target = &line[space + 1..];
    if target.is_empty() {
        return false;
    }

    out.method = method.to_vec();
    match target.iter().position(|&b| b == b'?') {
        Some(q) => {
            out.path = target[..q].to_vec();
            out.query = Some(target[q + 1..].to_vec());
        }
        None => {
            out.path = target.to_vec();
            out.query = None;
        }
    }
    true
}

const CONNECTION_KEEP_ALIVE: &[u8] = b"Connection: keep-alive";

/// Exact, case-sensitive match of the whole line against
/// `Connection: keep-alive`. This is narrower than [RFC 7230, Section
/// 6.1](https://datatracker.ietf.org/doc/html/rfc7230#section-6.1), which
/// treats `Connection` as a comma-separated, case-insensitive list; all
/// other headers are accepted silently.
fn parse_header_line(line: &[u8], out: &mut Request) {
    if line == CONNECTION_KEEP_ALIVE {
        out.keep_alive = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_method_path_and_query() {
        let mut req = Request::default();
        assert!(parse_request_line(b"GET /images/0.bmp?x=1 HTTP/1.1", &mut req));
        assert_eq!(req.method, b"GET");
        assert_eq!(req.path, b"/images/0.bmp");
        assert_eq!(req.query.as_deref(), Some(&b"x=1"[..]));
    }

    #[test]
    fn request_line_without_space_is_invalid() {
        let mut req = Request::default();
        assert!(!parse_request_line(b"GET", &mut req));
    }

    #[test]
    fn keep_alive_header_requires_exact_case_sensitive_match() {
        let mut req = Request::default();
        parse_header_line(b"connection: keep-alive", &mut req);
        assert!(!req.keep_alive);
        parse_header_line(b"Connection: keep-alive", &mut req);
        assert!(req.keep_alive);
    }

    #[test]
    fn unrecognised_headers_are_accepted_silently() {
        let mut req = Request::default();
        parse_header_line(b"Host: example.com", &mut req);
        assert!(!req.keep_alive);
    }
}
