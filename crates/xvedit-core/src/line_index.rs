//! Line start offsets for a terminator-delimited byte buffer.

use std::ops::Range;

use crate::buffer::TERMINATOR;

/// Offsets at which each line starts.
///
/// `starts[i]` is the offset of line `i + 1`. The final entry is the offset
/// just past the last terminator, so a buffer with `n` lines has `n + 1`
/// entries. Bytes after that offset form the unterminated tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    /// Scan `content` once and record every line start.
    pub fn build(content: &[u8]) -> Self {
        let mut starts = Vec::with_capacity(content.len() / 32 + 1);
        starts.push(0);
        starts.extend(
            content
                .iter()
                .enumerate()
                .filter(|(_, &byte)| byte == TERMINATOR)
                .map(|(offset, _)| offset + 1),
        );
        LineIndex { starts }
    }

    /// Number of terminated lines.
    pub fn line_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// Offset of the first byte of `line`.
    ///
    /// `line` may be `line_count() + 1`, which yields the end of the
    /// terminated content.
    pub fn start_of(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|i| self.starts.get(i)).copied()
    }

    /// Byte span of `line`, excluding its terminator.
    pub fn span_of(&self, line: usize) -> Option<Range<usize>> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        let start = self.starts[line - 1];
        let end = self.starts[line] - 1;
        Some(start..end)
    }

    /// Offset just past the last terminator.
    pub fn terminated_len(&self) -> usize {
        self.starts[self.starts.len() - 1]
    }
}
