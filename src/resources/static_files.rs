//! Static file and directory-listing resolution.
//!
//! A requested path is percent-decoded, canonicalised, and checked against
//! the canonicalised static root before being served as a file or, for a
//! directory, rendered as a recursive listing.

use crate::errors::ServerError;
use crate::http::response::{Response, ZeroCopy};
use crate::http::types::StatusCode;
use crate::resources::templates;
use percent_encoding::percent_decode;
use std::path::Path;

const MIME_TYPES: &[(&str, &str)] = &[
    (".svg", "image/svg+xml"),
    (".css", "text/css"),
    (".txt", "text/plain"),
];

fn guess_content_type(path: &[u8]) -> Option<&'static str> {
    let path = std::str::from_utf8(path).ok()?;
    MIME_TYPES
        .iter()
        .find(|(ext, _)| path.len() >= ext.len() && path[path.len() - ext.len()..].eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

/// Resolves `GET /static/<path>`. `raw_path` is the request path with the
/// leading `/` already stripped (e.g. `static/foo%20bar.txt`).
pub fn resolve(raw_path: &[u8], static_root: &str) -> Response {
    try_resolve(raw_path, static_root).unwrap_or_else(Response::from)
}

fn try_resolve(raw_path: &[u8], static_root: &str) -> Result<Response, ServerError> {
    let decoded = percent_decode(raw_path).collect::<Vec<u8>>();
    let decoded_str = String::from_utf8_lossy(&decoded);

    let canonical =
        std::fs::canonicalize(decoded_str.as_ref()).map_err(|_| ServerError::NotFound)?;
    let static_canonical = std::fs::canonicalize(static_root).map_err(ServerError::from)?;

    if !contains_path(&canonical, &static_canonical) {
        return Err(ServerError::PathTraversal);
    }

    let meta = std::fs::metadata(&canonical).map_err(ServerError::from)?;

    if meta.is_dir() {
        let body = list_dir(&canonical, decoded_str.as_ref()).map_err(ServerError::from)?;
        let mut response = Response::new(StatusCode::Ok);
        response.content_type = Some("text/html");
        response.body = body.into_bytes();
        return Ok(response);
    }

    let mut response = Response::new(StatusCode::Ok);
    response.content_type = guess_content_type(raw_path);
    response.zero_copy = Some(ZeroCopy {
        path: canonical,
        size: meta.len(),
        mtime: meta.modified().unwrap_or(std::time::SystemTime::UNIX_EPOCH),
    });
    Ok(response)
}

/// A plain substring check against the canonicalised static root, not a
/// path-component-aware prefix comparison: a sibling directory whose name
/// happens to contain the root as a substring would also pass.
fn contains_path(path: &Path, needle: &Path) -> bool {
    path.to_string_lossy().contains(needle.to_string_lossy().as_ref())
}

fn list_dir(path: &Path, requested: &str) -> std::io::Result<String> {
    let mut body = templates::dir_listing_header(requested);
    listdir_recursive(path, 1, &mut body)?;
    body.push_str(&templates::dir_listing_footer());
    Ok(body)
}

fn listdir_recursive(dir: &Path, indent: usize, body: &mut String) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name == "." || name == ".." {
            continue;
        }
        let file_type = entry.file_type()?;
        let dashes = "-".repeat(indent);

        if file_type.is_dir() {
            body.push_str(&format!("<p>\n{dashes}[{name}]\n</p>\n"));
            listdir_recursive(&entry.path(), indent + 1, body)?;
        } else {
            body.push_str(&format!("<p>\n{dashes}{name}\n</p>\n"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_known_extensions_case_insensitively() {
        assert_eq!(guess_content_type(b"a.SVG"), Some("image/svg+xml"));
        assert_eq!(guess_content_type(b"a.css"), Some("text/css"));
        assert_eq!(guess_content_type(b"a.txt"), Some("text/plain"));
        assert_eq!(guess_content_type(b"a.png"), None);
    }

    #[test]
    fn unknown_path_returns_404() {
        let response = resolve(b"static/does/not/exist", "static");
        assert_eq!(response.code(), StatusCode::NotFound);
    }

    #[test]
    fn directory_listing_dashes_one_per_depth() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("f.txt"), b"x").unwrap();

        let mut body = String::new();
        listdir_recursive(dir.path(), 1, &mut body).unwrap();
        assert!(body.contains("-[sub]"));
        assert!(body.contains("--f.txt"));
    }
}
