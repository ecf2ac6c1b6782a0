//! HTTP/1.1 request and response plumbing.

pub mod line_parser;
pub mod query;
pub mod request;
pub mod response;
pub mod types;
