use clap::Parser;
use std::process;
use tracing::{debug, info};
use xvedit::{init_logging, Cli, Result, RunConfig};
use xvedit_core::{storage, EditorSession};
use xvedit_io::{create_console_io, stdin_is_terminal};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = RunConfig::from_cli_args(&cli)?;
    config.session.show_prompt |= stdin_is_terminal();
    debug!(?config, "resolved configuration");

    let buffer = storage::load(&config.file, &config.buffer)?;
    let (input, output) = create_console_io();

    let mut session = EditorSession::new(config.session, buffer, config.file, input, output)?;
    let reason = session.run()?;
    info!(?reason, "editor exited");

    Ok(())
}
