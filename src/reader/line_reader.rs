//! Buffered line reader over a seekable byte source.
//!
//! This module provides [BufferedLineReader], which pulls large chunks from a
//! [Read] + [Seek] source into its own buffer and hands them out byte by
//! byte. The two-byte sequence `\r\n` is returned as a single `\n`, and every
//! logical newline bumps a 0-based line counter.
//!
//! # Refill protocol
//! The buffer is only refilled once at most one unconsumed byte is left. That
//! byte (the carry byte) is moved to the front before the bulk read, so a
//! `\r\n` split across two fills is still recognised.
//!
//! # Bookmarks
//! A bookmark stores the *raw* position of the underlying source, which is
//! ahead of the logical read position by however many bytes sit unconsumed
//! in the buffer. Restoring repositions the source only; the buffer is left
//! alone. Bookmark and restore are therefore only exact while the buffer is
//! drained (see [is_drained()](BufferedLineReader::is_drained)).

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::reader::reader_error::ReaderError;
use crate::reader::snapshot::{ReaderSnapshot, ReaderState};

// =#========================================================================#=
// BOOKMARK
// =#========================================================================$=
/// Saved raw position of the underlying source.
///
/// Opaque: it may only be handed back to the reader that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark(u64);

impl Bookmark {
    /// Raw source offset recorded by this bookmark.
    pub fn source_position(&self) -> u64 {
        self.0
    }
}

// =#========================================================================#=
// BUFFERED LINE READER
// =#========================================================================$=
/// A buffered, byte-at-a-time reader with `\r\n` normalization and line counting.
///
/// Works with any `R: Read + Seek`. Pass `&mut File` (or any other `&mut R`)
/// to keep ownership of the source with the caller; dropping the reader
/// never closes a borrowed source, and [into_inner()](Self::into_inner)
/// returns an owned one.
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use linebuf::BufferedLineReader;
///
/// let mut reader = BufferedLineReader::new(Cursor::new("id,name\r\n7,kea\n")).unwrap();
/// reader.skip_to_line_end().unwrap();
/// assert_eq!(reader.line_number(), 1);
/// assert_eq!(reader.fetch().unwrap(), Some(b'7'));
/// ```
pub struct BufferedLineReader<R: Read + Seek> {
    /// Underlying byte source
    source: R,

    /// Fixed-size buffer, `buffer.len()` is the capacity
    buffer: Vec<u8>,

    /// Index of the next unconsumed byte
    read_cursor: usize,

    /// Index one past the last valid byte
    filled_length: usize,

    /// Set once a read returned no more bytes, never reset
    reached_end: bool,

    /// Number of logical newlines returned by `fetch`
    line_number: usize,

    bookmark: Option<Bookmark>,
}

impl<R: Read + Seek> BufferedLineReader<R> {
    /// Default buffer capacity (16 MiB).
    pub const DEFAULT_CAPACITY: usize = 16 * 1024 * 1024;

    /// Smallest capacity that still fits the two-byte `\r\n` lookahead.
    pub const MIN_CAPACITY: usize = 2;

    /// Creates a reader with the [default capacity](Self::DEFAULT_CAPACITY).
    ///
    /// # Errors
    /// Returns [ReaderError::Allocation] if the buffer cannot be allocated.
    pub fn new(source: R) -> Result<Self, ReaderError> {
        Self::with_capacity(Self::DEFAULT_CAPACITY, source)
    }

    /// Creates a reader with a buffer of `capacity` bytes.
    ///
    /// Nothing is read from `source` until the first [peek()](Self::peek)
    /// or [fetch()](Self::fetch).
    ///
    /// # Errors
    /// * [ReaderError::InvalidCapacity] - if `capacity` is below [Self::MIN_CAPACITY]
    /// * [ReaderError::Allocation] - if the buffer cannot be allocated
    pub fn with_capacity(capacity: usize, source: R) -> Result<Self, ReaderError> {
        if capacity < Self::MIN_CAPACITY {
            return Err(ReaderError::InvalidCapacity { capacity });
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| ReaderError::Allocation { capacity })?;
        buffer.resize(capacity, 0);

        Ok(Self {
            source,
            buffer,
            read_cursor: 0,
            filled_length: 0,
            reached_end: false,
            line_number: 0,
            bookmark: None,
        })
    }

    // ------------------------------------------------------------------------
    // Consumption
    // ------------------------------------------------------------------------
    /// Returns the next byte without consuming it.
    ///
    /// Note that `peek` needs the two-byte lookahead window to be filled: once
    /// the source is exhausted and only a single byte is left, it already
    /// reports `None`, while [fetch()](Self::fetch) still returns that byte.
    /// The byte is returned raw, so a pending `\r\n` peeks as `\r`.
    ///
    /// # Returns
    /// * `Ok(Some(u8))` - The next unconsumed byte
    /// * `Ok(None)` - Fewer than two bytes left and end of source reached
    ///
    /// # Errors
    /// Returns [ReaderError::Read] if a refill was needed and the source failed.
    pub fn peek(&mut self) -> Result<Option<u8>, ReaderError> {
        self.ensure_data()?;

        if self.read_cursor + 1 >= self.filled_length {
            Ok(None)
        } else {
            Ok(Some(self.buffer[self.read_cursor]))
        }
    }

    /// Consumes and returns the next logical byte.
    ///
    /// `\r\n` is consumed as a pair and returned as `\n`. A lone `\r` or `\n`
    /// is returned unchanged. Each returned `\n` increments the line number.
    ///
    /// # Returns
    /// * `Ok(Some(u8))` - The next byte (after normalization)
    /// * `Ok(None)` - End of stream, returned for all subsequent calls too
    ///
    /// # Errors
    /// Returns [ReaderError::Read] if a refill was needed and the source failed.
    pub fn fetch(&mut self) -> Result<Option<u8>, ReaderError> {
        self.ensure_data()?;

        let (byte, width) = match &self.buffer[self.read_cursor..self.filled_length] {
            [] => return Ok(None),
            [b'\r', b'\n', ..] => (b'\n', 2),
            [byte, ..] => (*byte, 1),
        };

        self.read_cursor += width;
        if byte == b'\n' {
            self.line_number += 1;
        }

        Ok(Some(byte))
    }

    /// Consumes the rest of the current line, including its terminator.
    ///
    /// Both `\n` and `\r\n` terminate a line. Without a terminator, consumes
    /// to the end of the stream.
    ///
    /// # Errors
    /// Returns [ReaderError::Read] if a refill was needed and the source failed.
    pub fn skip_to_line_end(&mut self) -> Result<(), ReaderError> {
        while let Some(byte) = self.fetch()? {
            if byte == b'\n' {
                break;
            }
        }
        Ok(())
    }

    /// Refills the buffer when at most one unconsumed byte is left.
    ///
    /// The carry byte (if any) moves to index 0 and the rest of the buffer is
    /// filled from the source. A read returning 0 marks the end of the source.
    /// On a failed read, the bytes already read are kept and the cursors
    /// cover them, but `reached_end` stays unset.
    fn ensure_data(&mut self) -> Result<(), ReaderError> {
        let carry = self.filled_length - self.read_cursor;
        if self.reached_end || carry > 1 {
            return Ok(());
        }

        if carry == 1 {
            self.buffer[0] = self.buffer[self.read_cursor];
        }
        self.read_cursor = 0;
        self.filled_length = carry;

        while self.filled_length < self.buffer.len() {
            match self.source.read(&mut self.buffer[self.filled_length..]) {
                Ok(0) => {
                    self.reached_end = true;
                    break;
                }
                Ok(n) => self.filled_length += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(ReaderError::Read(e)),
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------------
    // Bookmark
    // ------------------------------------------------------------------------
    /// Saves the current raw position of the source, replacing any previous bookmark.
    ///
    /// The raw position includes bytes already pulled into the buffer but not
    /// yet consumed, so it only equals the logical position while
    /// [is_drained()](Self::is_drained) holds.
    ///
    /// # Errors
    /// Returns [ReaderError::Seek] if the source cannot report its position.
    pub fn set_bookmark(&mut self) -> Result<(), ReaderError> {
        let position = self.source.stream_position().map_err(ReaderError::Seek)?;
        self.bookmark = Some(Bookmark(position));
        Ok(())
    }

    /// Repositions the source to the saved bookmark.
    ///
    /// Only the source moves: cursors, buffered bytes, and the end-of-source
    /// flag stay as they are. Bytes still in the buffer are handed out before
    /// the source is read again, so restoring with a non-empty buffer replays
    /// or skips input.
    ///
    /// # Errors
    /// * [ReaderError::NoBookmark] - if no bookmark was set; reader state is unchanged
    /// * [ReaderError::Seek] - if the source cannot be repositioned
    pub fn goto_bookmark(&mut self) -> Result<(), ReaderError> {
        let bookmark = self.bookmark.ok_or(ReaderError::NoBookmark)?;
        self.source
            .seek(SeekFrom::Start(bookmark.0))
            .map_err(ReaderError::Seek)?;
        Ok(())
    }

    /// Discards the saved bookmark, if any.
    pub fn clear_bookmark(&mut self) {
        self.bookmark = None;
    }

    /// Returns the saved bookmark, if any.
    pub fn bookmark(&self) -> Option<Bookmark> {
        self.bookmark
    }

    // ------------------------------------------------------------------------
    // Inspection and lifecycle
    // ------------------------------------------------------------------------
    /// Number of logical newlines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Capacity of the internal buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Whether every buffered byte has been consumed.
    pub fn is_drained(&self) -> bool {
        self.read_cursor == self.filled_length
    }

    /// Returns a read-only snapshot of the reader's counters.
    pub fn inspect(&self) -> ReaderSnapshot {
        ReaderSnapshot {
            line_number: self.line_number,
            read_cursor: self.read_cursor,
            filled_length: self.filled_length,
            reached_end: self.reached_end,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ReaderState {
        self.inspect().state()
    }

    /// Returns a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Releases the buffer and bookmark and returns the source.
    ///
    /// The source position is wherever the last refill or restore left it,
    /// not the logical read position.
    pub fn into_inner(self) -> R {
        self.source
    }
}
