//! Tagged-union wire codec for requirement trees
//!
//! ```text
//! { "type": "Course", "content": "MATH240" }
//! { "type": "Group",  "content": { "operator": "AND", "groups": [ ... ] } }
//! ```

use serde_json::{json, Map, Value};

use super::ast::{Operator, ReqNode};
use super::error::RequirementError;

/// Encode a tree into its wire value
pub fn encode(root: &ReqNode) -> Value {
    match root {
        ReqNode::Course(code) => json!({ "type": "Course", "content": code }),
        ReqNode::Group { operator, groups } => json!({
            "type": "Group",
            "content": {
                "operator": operator.as_str(),
                "groups": groups.iter().map(encode).collect::<Vec<_>>(),
            }
        }),
    }
}

/// Decode a wire value into a tree.
///
/// Fails on the first malformed node; there is no partial result.
pub fn decode(value: &Value) -> Result<ReqNode, RequirementError> {
    let obj = value
        .as_object()
        .ok_or_else(|| RequirementError::malformed("node is not an object"))?;

    let tag = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| RequirementError::malformed("node is missing its `type` tag"))?;

    match tag {
        "Course" => decode_course(obj),
        "Group" => decode_group(obj),
        other => Err(RequirementError::malformed(format!(
            "unrecognized node type `{}`",
            other
        ))),
    }
}

fn decode_course(obj: &Map<String, Value>) -> Result<ReqNode, RequirementError> {
    match obj.get("content").and_then(Value::as_str) {
        Some(code) if !code.trim().is_empty() => Ok(ReqNode::Course(code.to_string())),
        Some(_) => Err(RequirementError::malformed("Course node has an empty code")),
        None => Err(RequirementError::malformed(
            "Course node is missing its `content` code",
        )),
    }
}

fn decode_group(obj: &Map<String, Value>) -> Result<ReqNode, RequirementError> {
    let content = obj
        .get("content")
        .and_then(Value::as_object)
        .ok_or_else(|| RequirementError::malformed("Group node is missing its `content`"))?;

    let operator = match content.get("operator") {
        None | Some(Value::Null) => {
            return Err(RequirementError::malformed(
                "Group node is missing its `operator`",
            ))
        }
        Some(Value::String(s)) => s.parse::<Operator>()?,
        Some(other) => return Err(RequirementError::InvalidOperator(other.to_string())),
    };

    let groups = content
        .get("groups")
        .and_then(Value::as_array)
        .ok_or_else(|| RequirementError::malformed("Group node is missing its `groups` list"))?
        .iter()
        .map(decode)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReqNode::Group { operator, groups })
}

/// Parse a tree from JSON text
pub fn from_json_str(input: &str) -> Result<ReqNode, RequirementError> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| RequirementError::malformed(format!("invalid JSON: {}", e)))?;
    decode(&value)
}

/// Render a tree as compact JSON text
pub fn to_json_string(root: &ReqNode) -> String {
    encode(root).to_string()
}

impl TryFrom<Value> for ReqNode {
    type Error = RequirementError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        decode(&value)
    }
}

impl From<ReqNode> for Value {
    fn from(node: ReqNode) -> Self {
        encode(&node)
    }
}
