// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree for course requirement expressions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::RequirementError;

/// Boolean combinator attached to a requirement group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Every child must be satisfied
    And,
    /// At least one child must be satisfied
    Or,
}

impl Operator {
    /// Wire spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Operator::And),
            "OR" => Ok(Operator::Or),
            other => Err(RequirementError::InvalidOperator(other.to_string())),
        }
    }
}

/// One node of a requirement expression.
///
/// A tree is built once per course fetch and only read afterwards.
/// Serde goes through the tagged wire codec, so trees embedded in
/// course records are checked the same way as trees decoded by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum ReqNode {
    /// Reference to a single course code, e.g. `MATH240`
    Course(String),
    /// Children combined with an operator; order is kept as inserted
    Group {
        operator: Operator,
        groups: Vec<ReqNode>,
    },
}

impl ReqNode {
    pub fn course(code: impl Into<String>) -> Self {
        ReqNode::Course(code.into())
    }

    /// Group whose children must all hold
    pub fn all(groups: Vec<ReqNode>) -> Self {
        ReqNode::Group {
            operator: Operator::And,
            groups,
        }
    }

    /// Group of which any child may hold
    pub fn any(groups: Vec<ReqNode>) -> Self {
        ReqNode::Group {
            operator: Operator::Or,
            groups,
        }
    }

    /// Course codes of every leaf, depth-first in stored child order.
    ///
    /// Repeated codes are kept; callers that need distinct codes dedup
    /// on their side.
    pub fn courses(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_courses(self, &mut out);
        out
    }

    /// Nesting depth, counting the root as 1.
    ///
    /// Unbounded on unvalidated input; run the validator first on trees
    /// from untrusted sources.
    pub fn depth(&self) -> usize {
        match self {
            ReqNode::Course(_) => 1,
            ReqNode::Group { groups, .. } => {
                1 + groups.iter().map(ReqNode::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn is_empty_group(&self) -> bool {
        matches!(self, ReqNode::Group { groups, .. } if groups.is_empty())
    }
}

fn collect_courses<'a>(node: &'a ReqNode, out: &mut Vec<&'a str>) {
    match node {
        ReqNode::Course(code) => out.push(code.as_str()),
        ReqNode::Group { groups, .. } => {
            for child in groups {
                collect_courses(child, out);
            }
        }
    }
}

/// Canonical form of a course code: whitespace dropped, upper-cased.
///
/// `"math 240"` and `"MATH240"` name the same course.
pub fn normalize_code(code: &str) -> String {
    code.split_whitespace().collect::<String>().to_uppercase()
}
