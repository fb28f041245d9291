//! Requirement tree evaluator

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use super::ast::{Operator, ReqNode};
use super::error::RequirementError;
use super::validator::validate;

/// Set of course codes a student has completed
pub trait CompletionSet {
    fn has(&self, code: &str) -> bool;
}

impl<S: BuildHasher> CompletionSet for HashSet<String, S> {
    fn has(&self, code: &str) -> bool {
        self.contains(code)
    }
}

impl<S: BuildHasher> CompletionSet for HashSet<&str, S> {
    fn has(&self, code: &str) -> bool {
        self.contains(code)
    }
}

impl CompletionSet for BTreeSet<String> {
    fn has(&self, code: &str) -> bool {
        self.contains(code)
    }
}

impl CompletionSet for BTreeSet<&str> {
    fn has(&self, code: &str) -> bool {
        self.contains(code)
    }
}

impl CompletionSet for [&str] {
    fn has(&self, code: &str) -> bool {
        self.iter().any(|c| *c == code)
    }
}

impl CompletionSet for [String] {
    fn has(&self, code: &str) -> bool {
        self.iter().any(|c| c == code)
    }
}

/// Evaluate a tree against a completion set.
///
/// Does not validate: the tree must already have passed the validator.
/// Behaviour on a cyclic or over-deep tree is undefined. Use [`check`] to
/// validate and evaluate in one step.
pub fn is_satisfied<C: CompletionSet + ?Sized>(root: &ReqNode, completed: &C) -> bool {
    match root {
        ReqNode::Course(code) => completed.has(code),
        ReqNode::Group {
            operator: Operator::And,
            groups,
        } => groups.iter().all(|child| is_satisfied(child, completed)),
        ReqNode::Group {
            operator: Operator::Or,
            groups,
        } => groups.iter().any(|child| is_satisfied(child, completed)),
    }
}

/// Validate with the default limits, then evaluate
pub fn check<C: CompletionSet + ?Sized>(
    root: &ReqNode,
    completed: &C,
) -> Result<bool, RequirementError> {
    validate(root)?;
    Ok(is_satisfied(root, completed))
}
