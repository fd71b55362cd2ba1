//! Error type for the buffered line reader.
//!
//! This module provides [ReaderError], covering construction failures,
//! failing reads and seeks on the underlying source, and a restore attempt
//! without a saved bookmark. Reaching the end of the stream is not an error:
//! consumption methods report it as `Ok(None)`.

use std::io;

use thiserror::Error;

// =#========================================================================#=
// READER ERROR
// =#========================================================================$=
/// Errors reported by a [BufferedLineReader](crate::reader::BufferedLineReader).
///
/// The reader never retries on its own (apart from `ErrorKind::Interrupted`
/// reads, which are retried like [std::io::Read::read_exact] does).
/// Whether to abort or continue after an error is up to the caller.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The buffer of the requested capacity could not be allocated.
    #[error("failed to allocate a read buffer of {capacity} bytes")]
    Allocation { capacity: usize },

    /// The requested capacity cannot hold the two bytes needed to detect `\r\n`.
    #[error("buffer capacity {capacity} is below the minimum of 2 bytes")]
    InvalidCapacity { capacity: usize },

    /// The underlying source failed while refilling the buffer.
    ///
    /// Bytes pulled in before the failure stay in the buffer.
    #[error("failed to read from source: {0}")]
    Read(#[source] io::Error),

    /// Querying or changing the position of the underlying source failed.
    #[error("failed to query or set source position: {0}")]
    Seek(#[source] io::Error),

    /// A restore was requested but no bookmark has been set.
    #[error("bookmark has not been set")]
    NoBookmark,
}

impl ReaderError {
    /// Returns `true` if this error is [ReaderError::NoBookmark].
    ///
    /// Useful for callers that treat a missing bookmark as a no-op.
    pub fn is_no_bookmark(&self) -> bool {
        matches!(self, ReaderError::NoBookmark)
    }
}
