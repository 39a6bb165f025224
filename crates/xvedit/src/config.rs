use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{ConfigError, Result};

/// Editor settings read from a YAML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    pub max_line_length: Option<usize>,
    pub max_lines: Option<usize>,
    pub prompt: Option<String>,
    pub confirm_drop: Option<bool>,
}

impl EditorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::ConfigFileNotFound(path.as_ref().to_path_buf()))?;

        // An empty file means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_line_length == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "max_line_length",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.max_lines == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "max_lines",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if let Some(prompt) = &self.prompt {
            if prompt.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "prompt",
                    reason: "cannot be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
