//! Read-only diagnostic view of a reader's internal state.

use std::fmt;

// =#========================================================================#=
// READER STATE
// =#========================================================================$=
/// Lifecycle state of a [BufferedLineReader](crate::reader::BufferedLineReader).
///
/// States only move forward: `Active` → `Draining` → `Exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// End of source not yet observed.
    Active,
    /// End of source observed, but the buffer still holds unconsumed bytes.
    Draining,
    /// End of source observed and buffer fully consumed.
    Exhausted,
}

// =#========================================================================#=
// READER SNAPSHOT
// =#========================================================================$=
/// Snapshot of the reader's counters, as returned by
/// [inspect()](crate::reader::BufferedLineReader::inspect).
///
/// Its [Display] output is a single `key=value` line meant for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderSnapshot {
    /// Number of logical newlines consumed so far
    pub line_number: usize,
    /// Index of the next unconsumed byte in the buffer
    pub read_cursor: usize,
    /// Index one past the last valid byte in the buffer
    pub filled_length: usize,
    /// Whether the end of the underlying source has been observed
    pub reached_end: bool,
}

impl ReaderSnapshot {
    /// Number of buffered bytes not yet consumed.
    pub fn unconsumed(&self) -> usize {
        self.filled_length - self.read_cursor
    }

    /// Lifecycle state implied by this snapshot.
    pub fn state(&self) -> ReaderState {
        if !self.reached_end {
            ReaderState::Active
        } else if self.unconsumed() > 0 {
            ReaderState::Draining
        } else {
            ReaderState::Exhausted
        }
    }
}

impl fmt::Display for ReaderSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line_number={} read_cursor={} filled_length={} reached_end={}",
            self.line_number, self.read_cursor, self.filled_length, self.reached_end
        )
    }
}
