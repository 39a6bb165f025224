//! Mock console implementations for testing

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{BackendType, ConsoleInput, ConsoleOutput, ConsoleResult};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock console input for testing
///
/// Clones share the same queue, so a test can keep a handle while the
/// session owns a boxed copy.
#[derive(Clone, Default)]
pub struct MockConsoleInput {
    input_queue: Arc<Mutex<VecDeque<String>>>,
    lines_read: Arc<AtomicUsize>,
}

impl MockConsoleInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input that will yield `lines` in order.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let input = Self::new();
        input.queue_lines(lines);
        input
    }

    /// Queue a single line
    pub fn queue_line(&self, line: impl Into<String>) {
        lock(&self.input_queue).push_back(line.into());
    }

    /// Queue multiple lines at once
    pub fn queue_lines<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.input_queue).extend(lines.into_iter().map(Into::into));
    }

    /// Get the number of lines not yet read
    pub fn queued_line_count(&self) -> usize {
        lock(&self.input_queue).len()
    }

    /// Get the number of lines handed out so far
    pub fn lines_read(&self) -> usize {
        self.lines_read.load(Ordering::Relaxed)
    }

    /// Clear all queued lines
    pub fn clear_queue(&self) {
        lock(&self.input_queue).clear();
    }
}

impl ConsoleInput for MockConsoleInput {
    fn read_line(&self) -> ConsoleResult<Option<String>> {
        let line = lock(&self.input_queue).pop_front();
        if line.is_some() {
            self.lines_read.fetch_add(1, Ordering::Relaxed);
        }
        Ok(line)
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Mock
    }
}

/// Mock console output for testing
#[derive(Clone, Default)]
pub struct MockConsoleOutput {
    output_buffer: Arc<Mutex<Vec<u8>>>,
    flush_count: Arc<AtomicUsize>,
}

impl MockConsoleOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get captured output for testing
    pub fn get_output(&self) -> Vec<u8> {
        lock(&self.output_buffer).clone()
    }

    /// Get output as string for testing
    pub fn get_output_string(&self) -> String {
        String::from_utf8_lossy(&self.get_output()).into_owned()
    }

    /// Number of times `flush` was called
    pub fn flush_count(&self) -> usize {
        self.flush_count.load(Ordering::Relaxed)
    }

    /// Clear captured output
    pub fn clear_output(&self) {
        lock(&self.output_buffer).clear();
    }
}

impl ConsoleOutput for MockConsoleOutput {
    fn write_text(&self, text: &str) -> ConsoleResult<()> {
        lock(&self.output_buffer).extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn flush(&self) -> ConsoleResult<()> {
        self.flush_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_console_input_creation() {
        let input = MockConsoleInput::new();
        assert_eq!(input.queued_line_count(), 0);
        assert_eq!(input.backend_type(), BackendType::Mock);
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_input_yields_lines_in_order() {
        let input = MockConsoleInput::with_lines(["LIST", "QUIT"]);
        input.queue_line("HELP");

        assert_eq!(input.queued_line_count(), 3);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("LIST"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("QUIT"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("HELP"));
        assert_eq!(input.read_line().unwrap(), None);
        assert_eq!(input.lines_read(), 3);
    }

    #[test]
    fn test_input_clones_share_queue() {
        let input = MockConsoleInput::new();
        let handle = input.clone();

        handle.queue_lines(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("a"));
        assert_eq!(handle.queued_line_count(), 1);

        handle.clear_queue();
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_output_capture() {
        let output = MockConsoleOutput::new();
        output.write_text("Hello").unwrap();
        output.write_text(", World!").unwrap();
        output.flush().unwrap();

        assert_eq!(output.get_output_string(), "Hello, World!");
        assert_eq!(output.flush_count(), 1);

        output.clear_output();
        assert!(output.get_output().is_empty());
    }

    #[test]
    fn test_factory_returns_mock_backends() {
        let (input, output) = crate::create_mock_console_io();
        assert_eq!(input.backend_type(), BackendType::Mock);
        assert_eq!(output.backend_type(), BackendType::Mock);
    }
}
