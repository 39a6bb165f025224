//! Console backends for the xvEdit session engine.
//!
//! - [`StdConsoleInput`] / [`StdConsoleOutput`]: process stdin/stdout, for
//!   terminals and pipes alike
//! - [`MockConsoleInput`] / [`MockConsoleOutput`]: in-memory, for tests

// Re-export core types and traits
pub use xvedit_core::{BackendType, ConsoleError, ConsoleInput, ConsoleOutput, ConsoleResult};

/// Create console input and output over the process's standard streams
pub fn create_console_io() -> (Box<dyn ConsoleInput>, Box<dyn ConsoleOutput>) {
    (
        Box::new(stdio::StdConsoleInput::new()),
        Box::new(stdio::StdConsoleOutput::new()),
    )
}

/// Create mock console I/O for testing
pub fn create_mock_console_io() -> (Box<dyn ConsoleInput>, Box<dyn ConsoleOutput>) {
    (
        Box::new(mock::MockConsoleInput::new()),
        Box::new(mock::MockConsoleOutput::new()),
    )
}

mod stdio;

// Mock implementation for testing
pub mod mock;

pub use mock::{MockConsoleInput, MockConsoleOutput};
pub use stdio::{stdin_is_terminal, StdConsoleInput, StdConsoleOutput};
