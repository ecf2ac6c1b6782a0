//! Query-string parsing.
//!
//! Pulls an integer `page` parameter out of `key=value&key=value` pairs
//! using a zero-copy, `memchr`-based split, matching the simple
//! `application/x-www-form-urlencoded` convention used by
//! [RFC 3986, Section 3.4](https://datatracker.ietf.org/doc/html/rfc3986#section-3.4).

use memchr::memchr;

/// Splits `query` (the bytes after `?`, not including it) into `key=value`
/// pairs and returns the value for `key`, or `None` if absent.
///
/// A pair with no `=` is treated as a key with an empty value.
pub fn get(query: &[u8], key: &[u8]) -> Option<&[u8]> {
    let mut rest = query;
    loop {
        if rest.is_empty() {
            return None;
        }
        let (pair, remainder) = match memchr(b'&', rest) {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, &[][..]),
        };
        rest = remainder;

        let (k, v) = match memchr(b'=', pair) {
            Some(pos) => (&pair[..pos], &pair[pos + 1..]),
            None => (pair, &[][..]),
        };
        if k == key {
            return Some(v);
        }
    }
}

/// Parses `query["page"]` as a signed integer, defaulting to `0` when the
/// parameter is absent or not a valid integer.
pub fn page_param(query: Option<&[u8]>) -> i64 {
    let Some(query) = query else { return 0 };
    let Some(raw) = get(query, b"page") else {
        return 0;
    };
    parse_decimal(raw).unwrap_or(0)
}

fn parse_decimal(bytes: &[u8]) -> Option<i64> {
    let text = std::str::from_utf8(bytes).ok()?;
    text.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_requested_key() {
        assert_eq!(get(b"page=5&other=1", b"page"), Some(&b"5"[..]));
        assert_eq!(get(b"other=1&page=5", b"page"), Some(&b"5"[..]));
    }

    #[test]
    fn missing_key_is_none() {
        assert_eq!(get(b"other=1", b"page"), None);
    }

    #[test]
    fn bare_key_has_empty_value() {
        assert_eq!(get(b"debug&page=3", b"debug"), Some(&b""[..]));
    }

    #[test]
    fn page_param_defaults_to_zero() {
        assert_eq!(page_param(None), 0);
        assert_eq!(page_param(Some(b"nothing=here")), 0);
        assert_eq!(page_param(Some(b"page=notanumber")), 0);
    }

    #[test]
    fn page_param_accepts_negative_values() {
        assert_eq!(page_param(Some(b"page=-1")), -1);
        assert_eq!(page_param(Some(b"page=99")), 99);
    }
}
