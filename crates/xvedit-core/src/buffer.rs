//! Line-oriented text buffer over a bounded byte arena.
//!
//! The whole document lives in one contiguous byte sequence with embedded
//! `\n` terminators. Lines are addressed by 1-based number and located
//! through a lazily built [`LineIndex`] that every mutation discards.

use std::cell::OnceCell;
use std::iter;

use tracing::debug;

use crate::config::BufferConfig;
use crate::error::{validation, EditError, EditResult};
use crate::line_index::LineIndex;

/// The byte that ends every line.
pub const TERMINATOR: u8 = b'\n';

/// Whether the buffer matches what was last loaded or saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    Clean,
    Dirty,
}

/// A bounded, line-addressable text buffer.
///
/// `num_lines` always equals the number of terminator bytes in the content.
/// Bytes after the last terminator (a file without a trailing newline) form
/// an unterminated tail that line operations never touch.
///
/// Every mutating operation either succeeds completely or returns an error
/// with the buffer left byte-for-byte unchanged.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    content: Vec<u8>,
    num_lines: usize,
    capacity: usize,
    state: BufferState,
    index: OnceCell<LineIndex>,
}

impl TextBuffer {
    /// Create an empty buffer sized by `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xvedit_core::{BufferConfig, TextBuffer};
    ///
    /// let buffer = TextBuffer::new(&BufferConfig::default());
    /// assert_eq!(buffer.num_lines(), 0);
    /// assert_eq!(buffer.capacity(), 256_000);
    /// ```
    pub fn new(config: &BufferConfig) -> Self {
        TextBuffer {
            content: Vec::new(),
            num_lines: 0,
            capacity: config.capacity(),
            state: BufferState::Clean,
            index: OnceCell::new(),
        }
    }

    /// Create a clean buffer holding `content`.
    ///
    /// Fails with [`EditError::Capacity`] when the content does not fit.
    pub fn from_bytes(content: Vec<u8>, config: &BufferConfig) -> EditResult<Self> {
        let capacity = config.capacity();
        validation::validate_capacity(content.len(), capacity)?;

        let num_lines = count_terminators(&content);
        Ok(TextBuffer {
            content,
            num_lines,
            capacity,
            state: BufferState::Clean,
            index: OnceCell::new(),
        })
    }

    /// Number of terminated lines.
    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// Used length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Maximum length in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The full document, exactly as it would be saved.
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Bytes after the last terminator.
    pub fn tail(&self) -> &[u8] {
        &self.content[self.line_index().terminated_len()..]
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    /// Whether the buffer has diverged from the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.state == BufferState::Dirty
    }

    /// Record that the content now matches the file on disk.
    pub fn mark_clean(&mut self) {
        self.state = BufferState::Clean;
    }

    /// Content of `line`, without its terminator.
    pub fn line(&self, line: usize) -> Option<&[u8]> {
        self.line_index()
            .span_of(line)
            .map(|span| &self.content[span])
    }

    /// Lines `start..=end` as `(line_number, text)` pairs.
    ///
    /// An `end` past the last line is clamped; a `start` of 0 is treated
    /// as 1. An empty or inverted range yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use xvedit_core::{BufferConfig, TextBuffer};
    ///
    /// let config = BufferConfig::default();
    /// let buffer = TextBuffer::from_bytes(b"alpha\nbeta\ngamma\n".to_vec(), &config).unwrap();
    ///
    /// let lines: Vec<_> = buffer.list(2, 99).collect();
    /// assert_eq!(lines, vec![(2, &b"beta"[..]), (3, &b"gamma"[..])]);
    /// ```
    pub fn list(&self, start: usize, end: usize) -> ListLines<'_> {
        ListLines {
            content: &self.content,
            index: self.line_index(),
            next: start.max(1),
            end: validation::clamp_end_line(end, self.num_lines),
        }
    }

    /// Every line in order.
    pub fn lines(&self) -> ListLines<'_> {
        self.list(1, self.num_lines)
    }

    /// Insert `text` as a new line before `line`.
    ///
    /// `line` may be `num_lines() + 1` to insert after the last line.
    ///
    /// # Examples
    ///
    /// ```
    /// use xvedit_core::{BufferConfig, TextBuffer};
    ///
    /// let config = BufferConfig::default();
    /// let mut buffer = TextBuffer::from_bytes(b"alpha\nbeta\n".to_vec(), &config).unwrap();
    ///
    /// buffer.insert_before(2, "new").unwrap();
    /// assert_eq!(buffer.as_bytes(), b"alpha\nnew\nbeta\n");
    /// assert_eq!(buffer.num_lines(), 3);
    /// ```
    pub fn insert_before(&mut self, line: usize, text: impl AsRef<[u8]>) -> EditResult<()> {
        let text = text.as_ref();
        validation::validate_line_text(text)?;
        validation::validate_insert_position(line, self.num_lines)?;

        let offset = self
            .line_index()
            .start_of(line)
            .ok_or_else(|| EditError::line_out_of_range(line, self.num_lines + 1))?;
        self.insert_line_at(offset, text)?;

        debug!(line, bytes = text.len(), "inserted line");
        Ok(())
    }

    /// Append `text` as the new last line.
    pub fn append(&mut self, text: impl AsRef<[u8]>) -> EditResult<()> {
        let text = text.as_ref();
        validation::validate_line_text(text)?;

        let offset = self.line_index().terminated_len();
        self.insert_line_at(offset, text)?;

        debug!(line = self.num_lines, bytes = text.len(), "appended line");
        Ok(())
    }

    /// Replace the content of `line` with `text`.
    ///
    /// The buffer grows or shrinks to fit; no bytes of the old line survive.
    pub fn replace(&mut self, line: usize, text: impl AsRef<[u8]>) -> EditResult<()> {
        let text = text.as_ref();
        validation::validate_line_text(text)?;
        validation::validate_line_number(line, self.num_lines)?;

        let span = self
            .line_index()
            .span_of(line)
            .ok_or_else(|| EditError::line_out_of_range(line, self.num_lines))?;
        let old_len = span.len();
        validation::validate_capacity(self.content.len() - old_len + text.len(), self.capacity)?;

        self.content.splice(span, text.iter().copied());
        self.touch();

        debug!(line, old_len, new_len = text.len(), "replaced line");
        Ok(())
    }

    /// Delete lines `start..=end`.
    pub fn delete_range(&mut self, start: usize, end: usize) -> EditResult<()> {
        validation::validate_range(start, end, self.num_lines)?;

        let index = self.line_index();
        let from = index.start_of(start);
        let to = index.start_of(end + 1);
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(EditError::line_out_of_range(end, self.num_lines)),
        };

        self.content.drain(from..to);
        self.num_lines -= end - start + 1;
        self.touch();

        debug!(start, end, bytes = to - from, "deleted lines");
        Ok(())
    }

    fn insert_line_at(&mut self, offset: usize, text: &[u8]) -> EditResult<()> {
        validation::validate_capacity(self.content.len() + text.len() + 1, self.capacity)?;

        let line = text.iter().copied().chain(iter::once(TERMINATOR));
        self.content.splice(offset..offset, line);
        self.num_lines += 1;
        self.touch();
        Ok(())
    }

    fn line_index(&self) -> &LineIndex {
        self.index.get_or_init(|| LineIndex::build(&self.content))
    }

    /// Mark the content changed and drop the stale index.
    fn touch(&mut self) {
        assert!(
            self.content.len() <= self.capacity,
            "buffer length {} exceeds capacity {}",
            self.content.len(),
            self.capacity
        );
        debug_assert_eq!(self.num_lines, count_terminators(&self.content));

        self.state = BufferState::Dirty;
        self.index = OnceCell::new();
    }
}

/// Iterator over a range of buffer lines.
#[derive(Debug, Clone)]
pub struct ListLines<'a> {
    content: &'a [u8],
    index: &'a LineIndex,
    next: usize,
    end: usize,
}

impl<'a> Iterator for ListLines<'a> {
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let line = self.next;
        self.next += 1;

        let span = self.index.span_of(line)?;
        Some((line, &self.content[span]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ListLines<'_> {}

fn count_terminators(content: &[u8]) -> usize {
    content.iter().filter(|&&byte| byte == TERMINATOR).count()
}
