// SPDX-License-Identifier: MIT

//! Errors raised while decoding or validating requirement trees

use thiserror::Error;

/// Reasons a requirement tree is unusable.
///
/// Any of these means "requirement data unavailable": callers fall back to
/// the raw prerequisite text instead of the tree or graph view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementError {
    /// Nesting deeper than the validator allows
    #[error("Requirement tree exceeds maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    /// A course code reappears on its own requirement path
    #[error("Cycle detected: course {0} appears in its own requirement chain")]
    CycleDetected(String),

    /// Operator outside AND/OR
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// Structure does not match the tagged wire shape
    #[error("Malformed requirement tree: {0}")]
    MalformedTree(String),
}

impl RequirementError {
    /// Stable tag for API responses
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DepthExceeded { .. } => "DepthExceeded",
            Self::CycleDetected(_) => "CycleDetected",
            Self::InvalidOperator(_) => "InvalidOperator",
            Self::MalformedTree(_) => "MalformedTree",
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTree(reason.into())
    }
}
