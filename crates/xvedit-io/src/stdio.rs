//! Console backends over the process's standard streams.

use std::io::{self, BufRead, Write};

use tracing::trace;
use xvedit_core::console::trim_line_ending;

use crate::{BackendType, ConsoleError, ConsoleInput, ConsoleOutput, ConsoleResult};

/// Whether standard input is attached to a terminal.
#[cfg(unix)]
pub fn stdin_is_terminal() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

/// Whether standard input is attached to a terminal.
#[cfg(not(unix))]
pub fn stdin_is_terminal() -> bool {
    use std::io::IsTerminal;
    io::stdin().is_terminal()
}

/// Line input from stdin.
pub struct StdConsoleInput {
    stdin: io::Stdin,
}

impl Default for StdConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl StdConsoleInput {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    /// Whether the input comes from a terminal rather than a pipe or file.
    pub fn is_interactive(&self) -> bool {
        stdin_is_terminal()
    }
}

impl ConsoleInput for StdConsoleInput {
    fn read_line(&self) -> ConsoleResult<Option<String>> {
        // Read raw bytes so a bad line is consumed whole and the next read
        // starts on the following line.
        let mut bytes = Vec::new();
        let read = self.stdin.lock().read_until(b'\n', &mut bytes)?;

        if read == 0 {
            trace!("stdin reached end of input");
            return Ok(None);
        }
        let mut line = String::from_utf8(bytes)
            .map_err(|_| ConsoleError::InvalidInput("line is not valid UTF-8".to_string()))?;
        trim_line_ending(&mut line);
        Ok(Some(line))
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Stdio
    }
}

/// Text output to stdout.
pub struct StdConsoleOutput {
    stdout: io::Stdout,
}

impl Default for StdConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl StdConsoleOutput {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl ConsoleOutput for StdConsoleOutput {
    fn write_text(&self, text: &str) -> ConsoleResult<()> {
        self.stdout.lock().write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> ConsoleResult<()> {
        self.stdout.lock().flush()?;
        Ok(())
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Stdio
    }
}
