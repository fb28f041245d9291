// SPDX-License-Identifier: MIT

//! Course requirement expressions
//!
//! A course's prerequisites or corequisites form a tree of AND/OR groups
//! over course codes:
//! - [`codec`] reads and writes the tagged wire format
//! - [`validator`] rejects cyclic, over-deep or malformed trees
//! - [`evaluator`] decides whether a completion set satisfies a tree
//! - [`projector`] flattens a tree into a node/edge graph
//!
//! Everything here is a pure function over an immutable tree.

mod ast;
pub mod codec;
mod error;
pub mod evaluator;
pub mod projector;
pub mod validator;

pub use ast::{normalize_code, Operator, ReqNode};
pub use codec::{decode, encode};
pub use error::RequirementError;
pub use evaluator::{check, is_satisfied, CompletionSet};
pub use projector::{
    project, GraphEdge, GraphNode, NodeSource, Projector, RequirementGraph, FOCUS_NODE_ID,
};
pub use validator::{validate, Validator, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
