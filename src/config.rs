//! Fixed constants for the server.
//!
//! Mirrors `examples/original_source/cifar-server/config.h` from the system
//! this crate is a port of: every tunable here was a `#define` there, kept
//! as a single named constant instead of a builder pattern because this
//! binary has exactly one deployment shape.

use std::time::Duration;

/// Number of worker threads in the fixed pool (`NUM_THREADS` upstream).
pub const NUM_WORKERS: usize = 5;

/// Listener backlog passed to `listen(2)`.
pub const BACKLOG: i32 = 10;

/// Read chunk size for `recv` while parsing a request (`RECV_BUF_SIZE`).
pub const RECV_BUF_SIZE: usize = 4096;

/// How long a worker waits for the next request on a kept-alive connection
/// before treating the peer as idle and reaping the connection.
pub const KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Retry budget for a `sendfile` call that reports `EINTR`/`EAGAIN`.
pub const MAX_SENDFILE_ATTEMPTS: u32 = 5;

/// Side length, in pixels, of one corpus image.
pub const IMAGE_SIDE: usize = 32;

/// Bytes per record: one class-label byte followed by three
/// `IMAGE_SIDE * IMAGE_SIDE` colour planes (R, G, B).
pub const RECORD_STRIDE: usize = 1 + IMAGE_SIDE * IMAGE_SIDE * 3;

/// Total number of records in the corpus.
pub const NUM_RECORDS: usize = 10_000;

/// Records shown per index page (a `TABLE_SIDE x TABLE_SIDE` grid).
pub const TABLE_SIDE: usize = 10;

/// Records per page (`TABLE_SIDE * TABLE_SIDE`).
pub const RECORDS_PER_PAGE: usize = TABLE_SIDE * TABLE_SIDE;

/// Number of index pages (`NUM_RECORDS / RECORDS_PER_PAGE`).
pub const NUM_PAGES: usize = NUM_RECORDS / RECORDS_PER_PAGE;

/// Path to the packed picture corpus, relative to the process's working directory.
pub const CORPUS_PATH: &str = "cifar/data_batch_1.bin";

/// Root directory served under `/static/...`.
pub const STATIC_ROOT: &str = "static";

/// Custom server-identifying header line, sent on every response.
pub const SERVER_HEADER_LINE: &str = "Server: my custom cifar server";

/// Page title used by the index and directory-listing templates.
pub const PAGE_TITLE: &str = "CIFAR Dataset Browser";
