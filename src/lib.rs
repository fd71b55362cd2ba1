//! Linebuf is a buffered byte reader for line-oriented text parsers.
//!
//! It sits between a seekable byte source (typically a [File](std::fs::File))
//! and a tokenizer that consumes input one byte at a time.
//! Core functionality provided:
//! - Bulk refills into a large buffer (16 MiB by default) to keep the number
//!   of read calls low.
//! - Byte-at-a-time consumption via [fetch()](BufferedLineReader::fetch) and
//!   one byte lookahead via [peek()](BufferedLineReader::peek).
//! - `\r\n` is normalized to a single `\n`; a lone `\r` or `\n` passes through.
//! - A 0-based line counter, incremented for each logical newline consumed.
//! - A single bookmark of the source's raw position, which can be restored later.
//! - A read-only [ReaderSnapshot] for diagnostics and log output.
//!
//! Limitations:
//! - Bytes are not decoded; only `\r` and `\n` have meaning.
//! - Only one bookmark at a time, and it records the *source* position, not
//!   the logical read position. See [BufferedLineReader::set_bookmark].
//! - Not thread-safe; the reader must be the only user of the source's position.
//!
//! # Example
//! ```
//! use std::io::Cursor;
//! use linebuf::LineReaderBuilder;
//!
//! let csv = "name,wingspan\r\nkea,95\r\nkaka,80\r\n";
//! let mut reader = LineReaderBuilder::for_source(Cursor::new(csv))
//!     .with_capacity(8)
//!     .build()?;
//!
//! reader.skip_to_line_end()?; // header
//! let mut first_field = Vec::new();
//! while let Some(byte) = reader.fetch()? {
//!     if byte == b',' {
//!         break;
//!     }
//!     first_field.push(byte);
//! }
//! assert_eq!(first_field, b"kea");
//! assert_eq!(reader.line_number(), 1);
//! # Ok::<(), linebuf::ReaderError>(())
//! ```

pub mod reader;

pub use reader::{
    Bookmark, BufferedLineReader, LineReaderBuilder, ReaderError, ReaderSnapshot, ReaderState,
};
