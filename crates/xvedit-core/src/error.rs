//! Error types for text buffer and storage operations.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during buffer and storage operations.
///
/// Capacity, range and text errors are recoverable: the buffer is left
/// byte-for-byte unchanged and the caller may carry on. I/O errors during
/// load are fatal for the editor.
#[derive(Debug, Error)]
pub enum EditError {
    /// The backing file could not be opened, read or written.
    #[error("cannot access file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The operation would grow the buffer past its configured capacity.
    #[error("insufficient space: {requested} bytes needed, capacity is {capacity}")]
    Capacity { requested: usize, capacity: usize },
    /// A line number outside the valid range was referenced.
    #[error("line {line} out of range (valid: 1 to {max})")]
    LineOutOfRange { line: usize, max: usize },
    /// A range whose start lies after its end.
    #[error("invalid range {start}:{end}")]
    InvalidRange { start: usize, end: usize },
    /// Text to store in a single line contains a line terminator.
    #[error("text must not contain a line terminator")]
    InvalidText,
    /// Buffer configuration is unusable.
    #[error("invalid buffer configuration: {0}")]
    InvalidConfig(String),
}

impl EditError {
    /// Create an I/O error for the given path.
    pub fn io(path: &Path, source: io::Error) -> Self {
        EditError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a capacity error.
    pub fn capacity(requested: usize, capacity: usize) -> Self {
        EditError::Capacity {
            requested,
            capacity,
        }
    }

    /// Create a line out of range error.
    pub fn line_out_of_range(line: usize, max: usize) -> Self {
        EditError::LineOutOfRange { line, max }
    }

    /// Create an invalid range error.
    pub fn invalid_range(start: usize, end: usize) -> Self {
        EditError::InvalidRange { start, end }
    }

    /// Whether the session can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EditError::Io { .. } | EditError::InvalidConfig(_))
    }
}

/// Result type for buffer operations.
pub type EditResult<T> = Result<T, EditError>;

/// Validation utilities for buffer operations.
pub mod validation {
    use super::{EditError, EditResult};
    use crate::buffer::TERMINATOR;

    /// Validate that `line` names an existing line.
    pub fn validate_line_number(line: usize, num_lines: usize) -> EditResult<()> {
        if line == 0 || line > num_lines {
            Err(EditError::line_out_of_range(line, num_lines))
        } else {
            Ok(())
        }
    }

    /// Validate an insert-before position, which may also name the slot
    /// after the last line.
    pub fn validate_insert_position(line: usize, num_lines: usize) -> EditResult<()> {
        if line == 0 || line > num_lines + 1 {
            Err(EditError::line_out_of_range(line, num_lines + 1))
        } else {
            Ok(())
        }
    }

    /// Validate an inclusive line range against the current line count.
    pub fn validate_range(start: usize, end: usize, num_lines: usize) -> EditResult<()> {
        if start > end {
            return Err(EditError::invalid_range(start, end));
        }
        validate_line_number(start, num_lines)?;
        validate_line_number(end, num_lines)
    }

    /// Validate that text can be stored as the content of a single line.
    pub fn validate_line_text(text: &[u8]) -> EditResult<()> {
        if text.contains(&TERMINATOR) {
            Err(EditError::InvalidText)
        } else {
            Ok(())
        }
    }

    /// Validate that a buffer of `requested` bytes fits the capacity.
    pub fn validate_capacity(requested: usize, capacity: usize) -> EditResult<()> {
        if requested > capacity {
            Err(EditError::capacity(requested, capacity))
        } else {
            Ok(())
        }
    }

    /// Clamp a listing end line to the number of lines.
    pub fn clamp_end_line(end: usize, num_lines: usize) -> usize {
        end.min(num_lines)
    }
}
