//! xvEdit Core Library
//!
//! This crate provides the line-oriented text buffer behind the xvEdit
//! editor: a bounded byte buffer addressed by 1-based line numbers, whole
//! file load/save, the command grammar, and the session engine that drives
//! a buffer from a console.

// Text buffer modules
pub mod buffer;
pub mod config;
pub mod error;
pub mod line_index;

// Persistence
pub mod storage;

// Command grammar
pub mod command;
pub mod range;

// Console I/O abstraction
pub mod console;

// Session engine
pub mod session;

// Re-export text buffer types
pub use buffer::{BufferState, ListLines, TextBuffer, TERMINATOR};
pub use config::{BufferConfig, DEFAULT_MAX_LINES, DEFAULT_MAX_LINE_LENGTH};
pub use error::{EditError, EditResult};
pub use line_index::LineIndex;

// Re-export command types
pub use command::{Command, CommandError, HELP_TEXT};
pub use range::RangeSpec;

// Re-export console types
pub use console::{BackendType, ConsoleError, ConsoleInput, ConsoleOutput, ConsoleResult};

// Re-export session types
pub use session::{EditorSession, ExitReason, Flow, SessionConfig, SessionError, DEFAULT_PROMPT};
