use std::path::PathBuf;
use thiserror::Error;
use xvedit_core::{EditError, SessionError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Edit(#[from] EditError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
