//! Per-connection servicer.
//!
//! Drives request receive into resolution into response send, in a
//! keep-alive loop. On a peer disconnect the connection is closed here; on
//! every other exit path the caller (the worker) closes it.

use crate::http::request::{self, Outcome};
use crate::http::response::{self, Response};
use crate::http::types::StatusCode;
use crate::resources::blob::Blob;
use crate::resources::{self, templates};
use std::net::TcpStream;

/// Serves requests on `conn` until the peer disconnects, sends a
/// terminal error, or drops keep-alive. Returns `true` if `conn` was
/// already closed by this call (the `Disconnected` case) so the caller
/// does not double-close.
pub fn serve(mut conn: TcpStream, blob: &Blob) -> bool {
    let mut keep = true;
    let mut first_request = true;

    while keep {
        let (outcome, request) = request::receive(&mut conn, !first_request);
        first_request = false;
        match outcome {
            Outcome::Success => {
                let response = resources::resolve(&request, blob);
                if response::send(&response, &mut conn).is_err() {
                    return false;
                }
                keep = request.keep_alive;
            }
            Outcome::BadRequest => {
                let _ = response::send(&terminal_error(StatusCode::BadRequest), &mut conn);
                return false;
            }
            Outcome::Error => {
                let _ = response::send(&terminal_error(StatusCode::InternalServerError), &mut conn);
                return false;
            }
            Outcome::Disconnected => {
                drop(conn);
                return true;
            }
        }
    }
    false
}

fn terminal_error(code: StatusCode) -> Response {
    let mut response = Response::new(code);
    response.content_type = Some("text/html");
    response.body = templates::error_page(code).into_bytes();
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    #[test]
    fn disconnected_client_is_closed_by_serve_itself() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("c.bin");
        std::fs::write(&corpus, vec![0u8; crate::config::RECORD_STRIDE]).unwrap();
        let blob = Blob::preload(&corpus, 1).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = std::thread::spawn(move || {
            let conn = std::net::TcpStream::connect(addr).unwrap();
            drop(conn);
        });

        let (server_side, _) = listener.accept().unwrap();
        let closed_by_serve = serve(server_side, &blob);
        assert!(closed_by_serve);
        client.join().unwrap();
    }

    #[test]
    fn bad_request_gets_400_and_connection_ends() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("c.bin");
        std::fs::write(&corpus, vec![0u8; crate::config::RECORD_STRIDE]).unwrap();
        let blob = Blob::preload(&corpus, 1).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = std::thread::spawn(move || {
            let mut conn = std::net::TcpStream::connect(addr).unwrap();
            conn.write_all(b"NOMETHODHERE\r\n\r\n").unwrap();
            let mut buf = Vec::new();
            conn.read_to_end(&mut buf).unwrap();
            buf
        });

        let (server_side, _) = listener.accept().unwrap();
        serve(server_side, &blob);
        let response = client.join().unwrap();
        assert!(String::from_utf8_lossy(&response).starts_with("HTTP/1.1 400"));
    }
}
