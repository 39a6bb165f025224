//! Editor command grammar.
//!
//! One command per input line. The keyword runs up to the first space and
//! is case-sensitive; the rest of the line holds the arguments.

use thiserror::Error;

use crate::range::RangeSpec;

/// Documentation printed by `HELP`.
pub const HELP_TEXT: &str = "\
Commands:
LIST [start:end]       - Show lines in range, each preceded by its line number
    LIST 1:20          - Lines 1 to 20
    LIST :30           - From the first line to line 30
    LIST 40:           - From line 40 to the end
    LIST               - The whole file
ADD< <line> <text>     - Insert text as a new line before the given line
    ADD< 5 Some text
@END <text>            - Append text as a new last line
    @END Closing line
EDIT <line> <text>     - Replace the given line with text
    EDIT 3 New text
DROP <start:end>       - Delete lines in range (asks for confirmation)
    DROP 2:5
QUIT                   - Leave the editor, optionally saving changes
HELP                   - Show this help
";

/// A parsed editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `LIST [range]`
    List(RangeSpec),
    /// `ADD< <line> <text>`
    InsertBefore { line: usize, text: String },
    /// `@END <text>`
    Append(String),
    /// `EDIT <line> <text>`
    Replace { line: usize, text: String },
    /// `DROP <range>`
    Drop(RangeSpec),
    Help,
    Quit,
}

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Invalid command syntax for {command}: {reason}")]
    InvalidSyntax {
        command: &'static str,
        reason: String,
    },
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

impl CommandError {
    fn syntax(command: &'static str, reason: &str) -> Self {
        CommandError::InvalidSyntax {
            command,
            reason: reason.to_string(),
        }
    }
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xvedit_core::{Command, RangeSpec};
    ///
    /// let command = Command::parse("EDIT 3 replacement text").unwrap();
    /// assert_eq!(
    ///     command,
    ///     Some(Command::Replace { line: 3, text: "replacement text".to_string() })
    /// );
    /// assert_eq!(
    ///     Command::parse("LIST 2:4").unwrap(),
    ///     Some(Command::List(RangeSpec::bounded(2, 4)))
    /// );
    /// assert_eq!(Command::parse("   ").unwrap(), None);
    /// ```
    pub fn parse(input: &str) -> Result<Option<Command>, CommandError> {
        let input = input.trim_start();
        if input.trim_end().is_empty() {
            return Ok(None);
        }

        let (keyword, args) = match input.split_once(' ') {
            Some((keyword, args)) => (keyword, Some(args)),
            None => (input.trim_end(), None),
        };

        let command = match keyword {
            "LIST" => Command::List(args.unwrap_or("").parse()?),
            "ADD<" => {
                let (line, text) = line_and_text("ADD<", args)?;
                Command::InsertBefore { line, text }
            }
            "@END" => Command::Append(args.unwrap_or("").to_string()),
            "EDIT" => {
                let (line, text) = line_and_text("EDIT", args)?;
                Command::Replace { line, text }
            }
            "DROP" => {
                let range = args
                    .map(str::trim)
                    .filter(|range| !range.is_empty())
                    .ok_or_else(|| CommandError::syntax("DROP", "a line range is required"))?;
                Command::Drop(range.parse()?)
            }
            "HELP" => Command::Help,
            "QUIT" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    /// The keyword that introduces this command.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::List(_) => "LIST",
            Command::InsertBefore { .. } => "ADD<",
            Command::Append(_) => "@END",
            Command::Replace { .. } => "EDIT",
            Command::Drop(_) => "DROP",
            Command::Help => "HELP",
            Command::Quit => "QUIT",
        }
    }

    /// Whether running this command can change the buffer.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::InsertBefore { .. }
                | Command::Append(_)
                | Command::Replace { .. }
                | Command::Drop(_)
        )
    }
}

/// Split `<line> <text>`; the text keeps its inner and trailing spaces.
fn line_and_text(
    command: &'static str,
    args: Option<&str>,
) -> Result<(usize, String), CommandError> {
    let args = args
        .map(str::trim_start)
        .ok_or_else(|| CommandError::syntax(command, "a line number and text are required"))?;
    let (line, text) = args
        .split_once(' ')
        .ok_or_else(|| CommandError::syntax(command, "text must follow the line number"))?;
    let line = line
        .parse::<usize>()
        .map_err(|_| CommandError::syntax(command, "line number expected"))?;
    Ok((line, text.to_string()))
}
