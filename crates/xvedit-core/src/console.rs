//! Line-based console input/output abstraction.
//!
//! The session engine talks to the terminal only through these traits so
//! that scripted tests can drive it with in-memory backends.

use std::io;
use thiserror::Error;

/// Source of command lines.
pub trait ConsoleInput: Send + Sync {
    /// Read the next line without its terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn read_line(&self) -> ConsoleResult<Option<String>>;

    /// Backend implementing this input.
    fn backend_type(&self) -> BackendType;
}

/// Sink for editor output.
pub trait ConsoleOutput: Send + Sync {
    /// Write text as-is; no newline is added.
    fn write_text(&self, text: &str) -> ConsoleResult<()>;

    /// Flush buffered output so prompts become visible.
    fn flush(&self) -> ConsoleResult<()>;

    /// Backend implementing this output.
    fn backend_type(&self) -> BackendType;
}

/// Backend implementation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Stdio,
    Mock,
}

/// Console operation errors
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Underlying stream failure
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    /// Input that cannot be interpreted as a command line
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Strip one trailing `\n` or `\r\n` from a raw line.
pub fn trim_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
