//! Incremental CRLF line accumulator.
//!
//! A byte buffer is grown until a `\n` is seen, the trailing `\r\n` is
//! stripped, and the resulting line is handed to a per-request callback.
//! One logical line may arrive split across many `consume` calls; one
//! `consume` call may complete several lines at once.

use memchr::memchr;

/// Accumulates bytes into CRLF-terminated lines and dispatches each
/// completed line to `on_line`.
///
/// `complete` is set once an empty line (end of headers) has been observed.
/// `invalid` is set if `on_line` rejected a line; once either flag is set
/// the driver stops feeding more bytes for this request.
pub struct LineParser {
    buf: Vec<u8>,
    line_num: usize,
    pub complete: bool,
    pub invalid: bool,
}

impl LineParser {
    pub fn new() -> Self {
        LineParser {
            buf: Vec::with_capacity(256),
            line_num: 0,
            complete: false,
            invalid: false,
        }
    }

    /// Feeds `data` into the accumulator, calling `on_line(line_num, line)`
    /// once per completed line (CRLF stripped). `on_line` returns `false` to
    /// mark the line invalid.
    ///
    /// Returns the number of bytes actually consumed. If `complete` becomes
    /// true partway through `data`, the remainder is left unconsumed; this
    /// is a signal to the caller, not an error.
    pub fn consume(&mut self, mut data: &[u8], mut on_line: impl FnMut(usize, &[u8]) -> bool) -> usize {
        let mut total = 0;
        while !data.is_empty() {
            let part_len = match memchr(b'\n', data) {
                Some(pos) => {
                    let part_len = pos + 1;
                    self.buf.extend_from_slice(&data[..part_len]);
                    self.process_line(&mut on_line);
                    self.line_num += 1;
                    part_len
                }
                None => {
                    self.buf.extend_from_slice(data);
                    data.len()
                }
            };
            data = &data[part_len..];
            total += part_len;
            if self.complete {
                break;
            }
        }
        total
    }

    fn process_line(&mut self, on_line: &mut impl FnMut(usize, &[u8]) -> bool) {
        let mut line: &[u8] = &self.buf;
        if let Some(stripped) = line.strip_suffix(b"\n") {
            line = stripped;
        }
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }

        if line.is_empty() {
            self.complete = true;
        } else if !on_line(self.line_num, line) {
            self.invalid = true;
        }

        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_one_recv_into_multiple_lines() {
        let mut parser = LineParser::new();
        let mut lines = Vec::new();
        let consumed = parser.consume(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n", |_, line| {
            lines.push(line.to_vec());
            true
        });
        assert_eq!(consumed, 29);
        assert!(parser.complete);
        assert!(!parser.invalid);
        assert_eq!(lines, vec![b"GET / HTTP/1.1".to_vec(), b"Host: x".to_vec()]);
    }

    #[test]
    fn reassembles_a_line_split_across_many_one_byte_feeds() {
        let mut parser = LineParser::new();
        let mut lines = Vec::new();
        let full = b"GET / HTTP/1.1\r\n\r\n";
        for byte in full {
            parser.consume(std::slice::from_ref(byte), |_, line| {
                lines.push(line.to_vec());
                true
            });
        }
        assert!(parser.complete);
        assert_eq!(lines, vec![b"GET / HTTP/1.1".to_vec()]);
    }

    #[test]
    fn stops_consuming_once_complete_mid_buffer() {
        let mut parser = LineParser::new();
        let consumed = parser.consume(b"\r\nTRAILING GARBAGE", |_, _| true);
        assert!(parser.complete);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn rejected_line_sets_invalid() {
        let mut parser = LineParser::new();
        parser.consume(b"not a request line\r\n", |_, _| false);
        assert!(parser.invalid);
        assert!(!parser.complete);
    }
}
