//! Resource resolver. Dispatches method and path to one of: index page,
//! record bitmap, static file or directory listing, or an error page.

pub mod bitmap;
pub mod blob;
pub mod static_files;
pub mod templates;

use crate::config::{IMAGE_SIDE, NUM_PAGES, NUM_RECORDS, RECORDS_PER_PAGE, RECORD_STRIDE, STATIC_ROOT, TABLE_SIDE};
use crate::errors::ServerError;
use crate::http::query;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::types::StatusCode;
use crate::resources::blob::Blob;

/// Resolves `request` against the corpus/static surface, consulting `blob`
/// for record bytes.
pub fn resolve(request: &Request, blob: &Blob) -> Response {
    try_resolve(request, blob).unwrap_or_else(Response::from)
}

fn try_resolve(request: &Request, blob: &Blob) -> Result<Response, ServerError> {
    if !request.method.eq_ignore_ascii_case(b"GET") {
        return Err(ServerError::MethodNotAllowed);
    }

    let path = &request.path[..];

    if path == b"/" {
        let page = query::page_param(request.query.as_deref());
        return index_page(page);
    }

    if let Some(rest) = path.strip_prefix(b"/images/".as_slice()) {
        let n = parse_record_number(rest).ok_or(ServerError::NotFound)?;
        return record_bitmap(n, blob);
    }

    if let Some(rest) = path.strip_prefix(b"/static/".as_slice()) {
        let mut raw = Vec::with_capacity(rest.len() + 7);
        raw.extend_from_slice(b"static/");
        raw.extend_from_slice(rest);
        return Ok(static_files::resolve(&raw, STATIC_ROOT));
    }

    Err(ServerError::NotFound)
}

/// Parses `<N>.bmp`, requiring the whole remainder to be digits followed by
/// the literal suffix (`sscanf("/images/%d.bmp")` semantics).
fn parse_record_number(rest: &[u8]) -> Option<i64> {
    let digits = rest.strip_suffix(b".bmp")?;
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(digits).ok()?.parse::<i64>().ok()
}

fn index_page(page: i64) -> Result<Response, ServerError> {
    if page < 0 || page >= NUM_PAGES as i64 {
        return Err(ServerError::NotFound);
    }
    let body = templates::index_page(page, RECORDS_PER_PAGE, NUM_PAGES as i64, TABLE_SIDE);
    let mut response = Response::new(StatusCode::Ok);
    response.content_type = Some("text/html");
    response.body = body.into_bytes();
    Ok(response)
}

fn record_bitmap(n: i64, blob: &Blob) -> Result<Response, ServerError> {
    if n < 0 || n >= NUM_RECORDS as i64 {
        return Err(ServerError::NotFound);
    }
    let record = blob.record_bytes(n as usize).ok_or(ServerError::NotFound)?;
    // Skip the class-label byte; the remainder is the three R/G/B planes.
    let planes = &record[1..RECORD_STRIDE];
    let bmp = bitmap::encode(IMAGE_SIDE as u32, IMAGE_SIDE as u32, planes)
        .ok_or(ServerError::Internal)?;

    let mut response = Response::new(StatusCode::Ok);
    response.content_type = Some("image/bmp");
    response.body = bmp;
    Ok(response)
}

fn error_page(code: StatusCode) -> Response {
    let mut response = Response::new(code);
    response.content_type = Some("text/html");
    response.body = templates::error_page(code).into_bytes();
    response
}

impl From<ServerError> for Response {
    fn from(err: ServerError) -> Self {
        error_page(err.status())
    }
}
