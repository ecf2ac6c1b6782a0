//! Internal error taxonomy.
//!
//! One flat enum. Every fallible internal path maps into one variant here,
//! and each variant knows which client-visible status code it corresponds
//! to. Keeping this mapping in one place means call sites convert a
//! `Result` straight into a response without re-deriving which HTTP status
//! a given failure deserves.

use crate::http::types::StatusCode;
use std::{error, fmt, io};

#[derive(Debug)]
pub enum ServerError {
    /// Request line or headers could not be parsed.
    BadRequest,
    /// Canonicalised static path escaped the static root.
    PathTraversal,
    /// Unknown route, out-of-range page/record, or missing static file.
    NotFound,
    /// Method other than GET.
    MethodNotAllowed,
    /// Record load, static stat, or bitmap encode failure.
    Internal,
    /// Underlying I/O error, surfaced for logging; callers that can still
    /// respond should prefer the structured variants above.
    Io(io::Error),
}

impl ServerError {
    /// The response status this error kind is reported as.
    pub const fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest | ServerError::PathTraversal => StatusCode::BadRequest,
            ServerError::NotFound => StatusCode::NotFound,
            ServerError::MethodNotAllowed => StatusCode::MethodNotAllowed,
            ServerError::Internal | ServerError::Io(_) => StatusCode::InternalServerError,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::BadRequest => write!(f, "bad request"),
            ServerError::PathTraversal => write!(f, "path escapes static root"),
            ServerError::NotFound => write!(f, "not found"),
            ServerError::MethodNotAllowed => write!(f, "method not allowed"),
            ServerError::Internal => write!(f, "internal error"),
            ServerError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl error::Error for ServerError {}

impl From<io::Error> for ServerError {
    fn from(e: io::Error) -> Self {
        ServerError::Io(e)
    }
}
