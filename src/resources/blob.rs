//! Record blob store.
//!
//! Opens the corpus file, stats it, maps it read-only and shared, and
//! keeps the mapping for the life of the process. Preloaded eagerly before
//! the worker pool starts, so no locking is needed once workers are
//! running.

use crate::config::RECORD_STRIDE;
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// Why [`Blob::preload`] failed.
#[derive(Debug)]
pub enum BlobError {
    Open(std::io::Error),
    Stat(std::io::Error),
    Map(std::io::Error),
    TooSmall { have: u64, want: u64 },
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobError::Open(e) => write!(f, "opening corpus file: {e}"),
            BlobError::Stat(e) => write!(f, "stat-ing corpus file: {e}"),
            BlobError::Map(e) => write!(f, "mmap-ing corpus file: {e}"),
            BlobError::TooSmall { have, want } => write!(
                f,
                "corpus file is {have} bytes, smaller than the {want} bytes the declared record count requires"
            ),
        }
    }
}

impl std::error::Error for BlobError {}

/// A read-only memory-mapped view of the picture corpus.
///
/// `Blob::record_bytes` is safe to call concurrently from every worker. The
/// mapping is established once, before the pool starts, and never mutated
/// or unmapped until process exit.
pub struct Blob {
    mmap: Mmap,
}

impl Blob {
    /// Opens, stats, and maps `path` read-only and shared. `num_records`
    /// bounds the minimum size the mapping must satisfy.
    pub fn preload(path: &Path, num_records: usize) -> Result<Self, BlobError> {
        let file = File::open(path).map_err(BlobError::Open)?;
        let meta = file.metadata().map_err(BlobError::Stat)?;

        let want = (num_records * RECORD_STRIDE) as u64;
        if meta.len() < want {
            return Err(BlobError::TooSmall {
                have: meta.len(),
                want,
            });
        }

        // SAFETY: the corpus file is not expected to be truncated or
        // modified concurrently by another process for the life of this
        // mapping.
        let mmap = unsafe { Mmap::map(&file) }.map_err(BlobError::Map)?;

        Ok(Blob { mmap })
    }

    /// Returns the `RECORD_STRIDE` bytes of record `n`, or `None` if out of
    /// bounds.
    pub fn record_bytes(&self, n: usize) -> Option<&[u8]> {
        let start = n.checked_mul(RECORD_STRIDE)?;
        let end = start.checked_add(RECORD_STRIDE)?;
        self.mmap.get(start..end)
    }
}
