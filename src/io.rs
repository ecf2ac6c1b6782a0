//! Byte-oriented I/O helpers.
//!
//! A retry-looped `send_all` for plain writes, and a `sendfile`-backed
//! zero-copy file transfer with a bounded retry count. `send_file` always
//! starts at offset 0 and treats the requested size as authoritative,
//! regardless of the file's actual length on disk.

use crate::config::MAX_SENDFILE_ATTEMPTS;
use std::io::{self, ErrorKind, Write};
use std::net::TcpStream;
use std::os::unix::io::AsRawFd;

/// Sends `bytes` to `conn` in full, retrying on interruption/would-block.
///
/// Any other error aborts the send and is returned to the caller.
pub fn send_all(conn: &mut TcpStream, mut bytes: &[u8]) -> io::Result<()> {
    while !bytes.is_empty() {
        match conn.write(bytes) {
            Ok(0) => {
                return Err(io::Error::new(ErrorKind::WriteZero, "peer closed connection"))
            }
            Ok(n) => bytes = &bytes[n..],
            Err(e) if e.kind() == ErrorKind::Interrupted || e.kind() == ErrorKind::WouldBlock => {
                continue
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Transmits `size` bytes of `file` to `conn` via `sendfile(2)`, starting at
/// offset 0. Retries up to [`MAX_SENDFILE_ATTEMPTS`] on interruption or
/// would-block; any other error fails the transfer.
#[cfg(unix)]
pub fn send_file(conn: &TcpStream, file: &std::fs::File, size: u64) -> io::Result<()> {
    let out_fd = conn.as_raw_fd();
    let in_fd = file.as_raw_fd();

    let mut offset: libc::off_t = 0;
    let mut remaining = size as usize;
    let mut attempts = 0u32;

    while remaining > 0 {
        let ret = unsafe { libc::sendfile(out_fd, in_fd, &mut offset, remaining) };
        if ret < 0 {
            let err = io::Error::last_os_error();
            if matches!(err.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock) {
                attempts += 1;
                if attempts >= MAX_SENDFILE_ATTEMPTS {
                    return Err(err);
                }
                continue;
            }
            return Err(err);
        }
        if ret == 0 {
            return Err(io::Error::new(
                ErrorKind::WriteZero,
                "sendfile transferred zero bytes before reaching requested size",
            ));
        }
        remaining -= ret as usize;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;

    #[test]
    fn send_all_delivers_every_byte() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let payload = vec![0x42u8; 200_000];
        let expected = payload.clone();

        let writer = std::thread::spawn(move || {
            let mut conn = TcpStream::connect(addr).unwrap();
            send_all(&mut conn, &payload).unwrap();
        });

        let (mut server_side, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        server_side.read_to_end(&mut received).unwrap();

        writer.join().unwrap();
        assert_eq!(received, expected);
    }
}
