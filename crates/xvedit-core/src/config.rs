//! Buffer sizing configuration.

use crate::error::{EditError, EditResult};

/// Default maximum length of a single line, in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 256;

/// Default maximum number of lines.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Sizing limits for a [`TextBuffer`](crate::TextBuffer).
///
/// The buffer capacity is the product of the two limits. Individual lines
/// are not checked against `max_line_length`; it only sizes the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    pub max_line_length: usize,
    pub max_lines: usize,
}

impl BufferConfig {
    pub fn new(max_line_length: usize, max_lines: usize) -> Self {
        BufferConfig {
            max_line_length,
            max_lines,
        }
    }

    /// Maximum number of bytes the buffer may hold.
    pub fn capacity(&self) -> usize {
        self.max_line_length.saturating_mul(self.max_lines)
    }

    /// Reject limits that would make every file oversized.
    pub fn validate(&self) -> EditResult<()> {
        if self.max_line_length == 0 {
            return Err(EditError::InvalidConfig(
                "max_line_length must be greater than 0".to_string(),
            ));
        }
        if self.max_lines == 0 {
            return Err(EditError::InvalidConfig(
                "max_lines must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig::new(DEFAULT_MAX_LINE_LENGTH, DEFAULT_MAX_LINES)
    }
}
