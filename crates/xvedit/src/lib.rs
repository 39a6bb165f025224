pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::{Cli, RunConfig};
pub use config::EditorConfig;
pub use error::{AppError, ConfigError, Result};
pub use logging::init_logging;
