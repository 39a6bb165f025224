//! Interactive editing session.
//!
//! [`EditorSession`] ties a [`TextBuffer`] to a file path and a console: it
//! prompts, reads one command per line, applies it and reports the outcome
//! until the user quits or the input ends.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::buffer::TextBuffer;
use crate::command::{Command, CommandError, HELP_TEXT};
use crate::console::{ConsoleError, ConsoleInput, ConsoleOutput};
use crate::error::{validation, EditError};
use crate::range::RangeSpec;
use crate::storage;

/// Prompt shown before each command by default.
pub const DEFAULT_PROMPT: &str = "XvEdit> ";

/// Configuration for an editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Prompt written before each command line
    pub prompt: String,
    /// Ask before DROP deletes lines
    pub confirm_drop: bool,
    /// Write the prompt at all; off when input is not a terminal
    pub show_prompt: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            confirm_drop: true,
            show_prompt: true,
        }
    }
}

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Console error: {0}")]
    Console(#[from] ConsoleError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `QUIT`; `saved` tells whether the buffer was written on the way out.
    Quit { saved: bool },
    /// Input ran out before `QUIT`. Unsaved changes are discarded.
    EndOfInput,
}

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(ExitReason),
}

/// A line editor bound to one file.
pub struct EditorSession {
    config: SessionConfig,
    buffer: TextBuffer,
    path: PathBuf,
    input: Box<dyn ConsoleInput>,
    output: Box<dyn ConsoleOutput>,
}

impl EditorSession {
    /// Create a session editing `buffer`, which will be saved to `path`.
    pub fn new(
        config: SessionConfig,
        buffer: TextBuffer,
        path: impl Into<PathBuf>,
        input: Box<dyn ConsoleInput>,
        output: Box<dyn ConsoleOutput>,
    ) -> Result<Self, SessionError> {
        Self::validate_config(&config)?;

        Ok(EditorSession {
            config,
            buffer,
            path: path.into(),
            input,
            output,
        })
    }

    fn validate_config(config: &SessionConfig) -> Result<(), SessionError> {
        if config.prompt.is_empty() {
            return Err(SessionError::Configuration(
                "Prompt cannot be empty".to_string(),
            ));
        }

        if config.prompt.chars().any(|c| c.is_control() && c != '\t') {
            return Err(SessionError::Configuration(
                "Prompt cannot contain control characters (except tab)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Give back the buffer, e.g. to inspect it after a scripted run.
    pub fn into_buffer(self) -> TextBuffer {
        self.buffer
    }

    /// Print the banner and process commands until the session ends.
    pub fn run(&mut self) -> Result<ExitReason, SessionError> {
        debug!(
            input = ?self.input.backend_type(),
            output = ?self.output.backend_type(),
            path = %self.path.display(),
            "starting session"
        );
        self.write(&format!(
            "Welcome to xvEdit!\n{} lines read from the file.\n",
            self.buffer.num_lines()
        ))?;

        loop {
            if self.config.show_prompt {
                let prompt = self.config.prompt.clone();
                self.write(&prompt)?;
            }

            let line = match self.input.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    if self.config.show_prompt {
                        self.write("\n")?;
                    }
                    if self.buffer.is_dirty() {
                        warn!("input ended with unsaved changes; discarding them");
                    }
                    return Ok(ExitReason::EndOfInput);
                }
                Err(ConsoleError::InvalidInput(reason)) => {
                    warn!(%reason, "skipping unreadable input line");
                    self.write(&format!("Error: invalid input: {reason}\n"))?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if let Flow::Exit(reason) = self.execute_line(&line)? {
                info!(?reason, "session finished");
                return Ok(reason);
            }
        }
    }

    /// Parse and run one input line. Blank lines are ignored.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, SessionError> {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                warn!(error = %e, "rejected command");
                self.report_command_error(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run a parsed command.
    ///
    /// Recoverable edit errors are reported on the console and the session
    /// continues; anything else is returned.
    pub fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        let keyword = command.keyword();
        debug!(
            command = keyword,
            mutating = command.is_mutating(),
            "executing command"
        );

        let result = match command {
            Command::List(range) => self.list(range),
            Command::InsertBefore { line, text } => self
                .buffer
                .insert_before(line, text)
                .map(|()| Flow::Continue)
                .map_err(SessionError::from),
            Command::Append(text) => self
                .buffer
                .append(text)
                .map(|()| Flow::Continue)
                .map_err(SessionError::from),
            Command::Replace { line, text } => self
                .buffer
                .replace(line, text)
                .map(|()| Flow::Continue)
                .map_err(SessionError::from),
            Command::Drop(range) => self.drop_lines(range),
            Command::Help => self.write(HELP_TEXT).map(|()| Flow::Continue),
            Command::Quit => self.quit(),
        };

        match result {
            Err(SessionError::Edit(e)) if e.is_recoverable() => {
                warn!(command = keyword, error = %e, "command failed");
                self.write(&format!("Error: {e}\n"))?;
                Ok(Flow::Continue)
            }
            other => other,
        }
    }

    fn list(&mut self, range: RangeSpec) -> Result<Flow, SessionError> {
        let (start, end) = range.resolve(self.buffer.num_lines());
        let last = validation::clamp_end_line(end, self.buffer.num_lines());
        let width = digits(last);
        debug!(%range, start, last, "listing lines");

        let mut listing = String::new();
        for (number, text) in self.buffer.list(start, end) {
            let _ = writeln!(
                listing,
                "{number:>width$}: {}",
                String::from_utf8_lossy(text)
            );
        }

        self.write(&listing)?;
        Ok(Flow::Continue)
    }

    fn drop_lines(&mut self, range: RangeSpec) -> Result<Flow, SessionError> {
        let (start, end) = range.resolve(self.buffer.num_lines());
        validation::validate_range(start, end, self.buffer.num_lines())?;
        let count = end - start + 1;

        if self.config.confirm_drop {
            let answer = self.ask(&format!("Drop {count} lines (y/N)? "))?;
            let confirmed = matches!(answer.as_deref().map(str::trim), Some("y" | "Y"));
            if !confirmed {
                debug!(%range, start, end, "drop declined");
                return Ok(Flow::Continue);
            }
        }

        self.buffer.delete_range(start, end)?;
        debug!(%range, count, "lines dropped");
        self.write(&format!("{count} lines dropped\n"))?;
        Ok(Flow::Continue)
    }

    fn quit(&mut self) -> Result<Flow, SessionError> {
        if !self.buffer.is_dirty() {
            return Ok(Flow::Exit(ExitReason::Quit { saved: false }));
        }

        // Only an explicit yes saves; an empty answer or end of input discards.
        let answer = self.ask("Save changes (Y/n)? ")?;
        let confirmed = answer
            .as_deref()
            .map(str::trim_start)
            .is_some_and(|a| a.starts_with(['y', 'Y']));
        if !confirmed {
            info!("quitting without saving");
            return Ok(Flow::Exit(ExitReason::Quit { saved: false }));
        }

        match storage::save(&mut self.buffer, &self.path) {
            Ok(()) => {
                self.write("Changes saved.\n")?;
                Ok(Flow::Exit(ExitReason::Quit { saved: true }))
            }
            Err(e) => {
                warn!(error = %e, "save failed, staying in the editor");
                self.write(&format!("Error: {e}\n"))?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Write a question and read the answer line.
    ///
    /// An unreadable answer counts as an empty one.
    fn ask(&mut self, question: &str) -> Result<Option<String>, SessionError> {
        self.write(question)?;
        match self.input.read_line() {
            Err(ConsoleError::InvalidInput(reason)) => {
                warn!(%reason, "unreadable answer");
                Ok(Some(String::new()))
            }
            other => Ok(other?),
        }
    }

    fn report_command_error(&mut self, error: &CommandError) -> Result<(), SessionError> {
        self.write(&format!("{error}\n"))
    }

    fn write(&mut self, text: &str) -> Result<(), SessionError> {
        self.output.write_text(text)?;
        self.output.flush()?;
        Ok(())
    }
}

/// Decimal digits needed to print `n`.
fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}
