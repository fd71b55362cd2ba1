//! Buffered line reader and its supporting types.
pub mod builder;
pub mod line_reader;
pub mod reader_error;
pub mod snapshot;

pub use builder::LineReaderBuilder;
pub use line_reader::{Bookmark, BufferedLineReader};
pub use reader_error::ReaderError;
pub use snapshot::{ReaderSnapshot, ReaderState};
