use clap::{ArgAction, Parser};
use crate::config::EditorConfig;
use crate::error::Result;
use std::path::PathBuf;
use xvedit_core::{
    BufferConfig, SessionConfig, DEFAULT_MAX_LINES, DEFAULT_MAX_LINE_LENGTH, DEFAULT_PROMPT,
};

#[derive(Parser)]
#[command(name = "xvedit")]
#[command(about = "Line-oriented text editor")]
#[command(version)]
pub struct Cli {
    /// File to edit
    pub file: PathBuf,

    /// Maximum line length used to size the buffer
    #[arg(long)]
    pub max_line_length: Option<usize>,

    /// Maximum number of lines used to size the buffer
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Prompt shown before each command
    #[arg(long)]
    pub prompt: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Drop lines without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Show the prompt even when input is not a terminal
    #[arg(short, long)]
    pub interactive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub file: PathBuf,
    pub buffer: BufferConfig,
    pub session: SessionConfig,
    pub verbosity: u8,
}

impl RunConfig {
    /// Merge command line flags over the config file over the defaults.
    pub fn from_cli_args(cli: &Cli) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => EditorConfig::from_file(path)?,
            None => EditorConfig::default(),
        };
        Self::merge(cli, file_config)
    }

    fn merge(cli: &Cli, file_config: EditorConfig) -> Result<Self> {
        let buffer = BufferConfig::new(
            cli.max_line_length
                .or(file_config.max_line_length)
                .unwrap_or(DEFAULT_MAX_LINE_LENGTH),
            cli.max_lines
                .or(file_config.max_lines)
                .unwrap_or(DEFAULT_MAX_LINES),
        );
        buffer.validate()?;

        let session = SessionConfig {
            prompt: cli
                .prompt
                .clone()
                .or(file_config.prompt)
                .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            confirm_drop: !cli.yes && file_config.confirm_drop.unwrap_or(true),
            show_prompt: cli.interactive,
        };

        Ok(Self {
            file: cli.file.clone(),
            buffer,
            session,
            verbosity: cli.verbose,
        })
    }
}
