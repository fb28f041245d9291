// SPDX-License-Identifier: MIT

//! Runtime configuration
//!
//! Values come from, in increasing precedence:
//! - built-in defaults
//! - an optional YAML file
//! - `COURSEREQ_*` environment variables (a `.env` file is loaded by the binary)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::requirement::{Validator, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};

/// HTTP service settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Deepest requirement tree accepted by the validator
    pub max_depth: usize,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load from an optional YAML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                Self::parse_yaml(&content)?
            }
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn parse_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Apply `COURSEREQ_*` overrides read through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("COURSEREQ_MAX_DEPTH") {
            self.max_depth = value
                .parse()
                .map_err(|_| AppError::config(format!("invalid COURSEREQ_MAX_DEPTH: {}", value)))?;
        }
        if let Some(value) = lookup("COURSEREQ_HOST") {
            self.server.host = value;
        }
        if let Some(value) = lookup("COURSEREQ_PORT") {
            self.server.port = value
                .parse()
                .map_err(|_| AppError::config(format!("invalid COURSEREQ_PORT: {}", value)))?;
        }
        self.check()?;
        Ok(self)
    }

    fn check(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(AppError::config("max_depth must be at least 1"));
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(AppError::config(format!(
                "max_depth {} is above the supported maximum of {}",
                self.max_depth, MAX_SUPPORTED_DEPTH
            )));
        }
        Ok(())
    }

    /// Validator configured with this depth limit
    pub fn validator(&self) -> Validator {
        Validator::new().with_max_depth(self.max_depth)
    }
}
