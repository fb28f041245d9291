//! Structural checks run before a tree is evaluated or projected

use super::ast::{normalize_code, ReqNode};
use super::error::RequirementError;

/// Nesting limit used when nothing else is configured
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Deepest limit a configuration may ask for.
///
/// Every tree level costs three JSON nesting levels (`{`, `"content": {`,
/// `"groups": [`) and serde_json refuses input nested 128 deep. A tree at
/// this depth still parses when wrapped in a course record inside a request
/// body, so the validator, not the parser, is what rejects deeper trees.
pub const MAX_SUPPORTED_DEPTH: usize = 40;

/// Checks that a tree is finite, shallow enough and free of cycles.
///
/// A tree that passes is safe for the evaluator and the projector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    max_depth: usize,
    /// Codes in progress above the root; leaves are terminal, so this is
    /// the whole active path for every leaf
    ancestors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ancestors: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Treat `code` as the course this tree describes, so a leaf naming it
    /// anywhere below is reported as a cycle.
    pub fn with_owner(mut self, code: impl AsRef<str>) -> Self {
        self.ancestors.push(normalize_code(code.as_ref()));
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate a tree
    pub fn validate(&self, root: &ReqNode) -> Result<(), RequirementError> {
        let result = self.walk(root, 1);

        match &result {
            Ok(()) if log::log_enabled!(log::Level::Debug) => log::debug!(
                "Requirement tree accepted ({} course references)",
                root.courses().len()
            ),
            Ok(()) => {}
            Err(e) => log::warn!("Requirement tree rejected: {}", e),
        }
        result
    }

    fn walk(&self, node: &ReqNode, depth: usize) -> Result<(), RequirementError> {
        if depth > self.max_depth {
            return Err(RequirementError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        match node {
            ReqNode::Course(code) => {
                if code.trim().is_empty() {
                    return Err(RequirementError::malformed("Course node has an empty code"));
                }
                let key = normalize_code(code);
                if self.ancestors.contains(&key) {
                    return Err(RequirementError::CycleDetected(key));
                }
                Ok(())
            }
            ReqNode::Group { groups, .. } => {
                for child in groups {
                    self.walk(child, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with the default depth limit and no owning course
pub fn validate(root: &ReqNode) -> Result<(), RequirementError> {
    Validator::new().validate(root)
}
