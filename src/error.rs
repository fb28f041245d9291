// SPDX-License-Identifier: MIT

//! Typed error handling for coursereq
//!
//! Tree-level problems are [`RequirementError`]s; this module wraps them
//! together with the I/O, parsing and configuration failures that happen
//! around them.

use thiserror::Error;

use crate::requirement::RequirementError;

/// Top-level error type for coursereq
#[derive(Debug, Error)]
pub enum AppError {
    /// Requirement tree could not be decoded or validated
    #[error("Requirement error: {0}")]
    Requirement(#[from] RequirementError),

    /// Course code not present in the loaded catalog
    #[error("Course '{code}' not found")]
    CourseNotFound { code: String },

    /// Course record has no requirement tree of the requested kind
    #[error("Course '{code}' has no {kind} tree")]
    MissingRequirements { code: String, kind: String },

    /// Configuration errors (bad env vars, invalid config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    pub fn course_not_found(code: impl Into<String>) -> Self {
        Self::CourseNotFound { code: code.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
