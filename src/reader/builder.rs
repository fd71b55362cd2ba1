//! Builder for configuring a [BufferedLineReader].

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::reader::line_reader::BufferedLineReader;
use crate::reader::reader_error::ReaderError;

// =#========================================================================#=
// LINE READER BUILDER
// =#========================================================================$=
/// Builder for configuring and creating a [BufferedLineReader].
///
/// # Configuration Options
/// * **Capacity**: [`with_capacity()`](Self::with_capacity) sets the buffer
///   size (default: [BufferedLineReader::DEFAULT_CAPACITY]).
///
/// * **Size hint**: When created via [`for_file()`](LineReaderBuilder::for_file)
///   on a regular, non-empty file, the file length is recorded and the
///   default buffer is shrunk to `file length + 1` if that is smaller, so
///   small files are read (and their end detected) in a single refill
///   without allocating the full default buffer. An explicit
///   [`with_capacity()`](Self::with_capacity) is always used as given.
///   Files reporting length 0 (procfs, FIFOs, device nodes) get no hint.
///
/// # Example
/// ```no_run
/// use linebuf::LineReaderBuilder;
///
/// let mut reader = LineReaderBuilder::for_file("measurements.csv")?
///     .with_capacity(64 * 1024)
///     .build()?;
///
/// reader.skip_to_line_end()?; // skip header
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct LineReaderBuilder<R: Read + Seek> {
    source: R,
    capacity: usize,
    explicit_capacity: bool,
    size_hint: Option<u64>,
}

/// Length usable as a size hint, if any.
///
/// Only regular files with a non-zero length qualify; special files often
/// report 0 while still producing data.
fn file_size_hint(is_file: bool, len: u64) -> Option<u64> {
    (is_file && len > 0).then_some(len)
}

impl LineReaderBuilder<File> {
    /// Opens the file at `path` and creates a builder for it.
    ///
    /// # Arguments
    /// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or its metadata read.
    pub fn for_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        let size_hint = file_size_hint(metadata.is_file(), metadata.len());
        Ok(Self {
            source: file,
            capacity: BufferedLineReader::<File>::DEFAULT_CAPACITY,
            explicit_capacity: false,
            size_hint,
        })
    }
}

impl<R: Read + Seek> LineReaderBuilder<R> {
    /// Creates a builder for an already opened source with default settings.
    pub fn for_source(source: R) -> Self {
        Self {
            source,
            capacity: BufferedLineReader::<R>::DEFAULT_CAPACITY,
            explicit_capacity: false,
            size_hint: None,
        }
    }

    /// Sets the buffer capacity in bytes.
    ///
    /// Overrides any size hint from [`for_file()`](LineReaderBuilder::for_file).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self.explicit_capacity = true;
        self
    }

    /// Capacity the reader will be built with.
    pub fn effective_capacity(&self) -> usize {
        match self.size_hint {
            Some(len) if !self.explicit_capacity => {
                let fitted = usize::try_from(len.saturating_add(1)).unwrap_or(usize::MAX);
                self.capacity.min(fitted)
            }
            _ => self.capacity,
        }
    }

    /// Allocates the buffer and creates the reader.
    ///
    /// # Errors
    /// * [ReaderError::InvalidCapacity] - if the capacity is below
    ///   [BufferedLineReader::MIN_CAPACITY]
    /// * [ReaderError::Allocation] - if the buffer cannot be allocated
    pub fn build(self) -> Result<BufferedLineReader<R>, ReaderError> {
        let capacity = self.effective_capacity();
        BufferedLineReader::with_capacity(capacity, self.source)
    }
}
