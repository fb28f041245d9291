// SPDX-License-Identifier: MIT

//! Projection of a requirement tree into a flat dependency graph
//!
//! The graph widget consumes nodes and edges, not trees. Projection is
//! lossy: every distinct course leaf gets one node and one edge into the
//! focus node, whichever AND/OR groups it sat under. Callers that need the
//! boolean structure read the [`ReqNode`] itself.

use serde::Serialize;
use std::collections::HashSet;

use super::ast::{normalize_code, ReqNode};

/// Id of the node for the course being inspected
pub const FOCUS_NODE_ID: u32 = 1;

/// What a graph node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeSource {
    /// The course whose requirements are shown
    Focus,
    /// A distinct course leaf of the tree
    Course,
}

/// A node of the projected graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: u32,
    pub label: String,
    /// Tooltip text, only set on the focus node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip)]
    pub source: NodeSource,
}

/// Edge from a prerequisite to the node that requires it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    pub from: u32,
    pub to: u32,
}

/// Node/edge graph handed to the visualization layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl RequirementGraph {
    pub fn focus(&self) -> Option<&GraphNode> {
        self.node(FOCUS_NODE_ID)
    }

    pub fn node(&self, id: u32) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_by_label(&self, label: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Nodes that depend on `id`
    pub fn dependents_of(&self, id: u32) -> Vec<&GraphNode> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .filter_map(|e| self.node(e.to))
            .collect()
    }

    /// Nodes that `id` depends on
    pub fn prerequisites_of(&self, id: u32) -> Vec<&GraphNode> {
        self.edges
            .iter()
            .filter(|e| e.to == id)
            .filter_map(|e| self.node(e.from))
            .collect()
    }
}

/// Builds [`RequirementGraph`]s around a focus course
#[derive(Debug, Clone)]
pub struct Projector {
    focus: String,
    title: Option<String>,
}

impl Projector {
    pub fn new(focus: impl Into<String>) -> Self {
        Self {
            focus: focus.into(),
            title: None,
        }
    }

    /// Attach a tooltip to the focus node
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Project a validated tree.
    ///
    /// Leaf ids are handed out in first-discovery order of a depth-first
    /// walk, so structurally equal trees always get the same ids. Leaves
    /// are merged on their normalized code and labelled with the first
    /// spelling seen.
    pub fn project(&self, root: &ReqNode) -> RequirementGraph {
        let mut nodes = vec![GraphNode {
            id: FOCUS_NODE_ID,
            label: self.focus.clone(),
            title: self.title.clone(),
            source: NodeSource::Focus,
        }];
        let mut edges = Vec::new();
        let mut seen = HashSet::new();
        let mut next_id = FOCUS_NODE_ID + 1;

        for code in root.courses() {
            if !seen.insert(normalize_code(code)) {
                continue;
            }
            nodes.push(GraphNode {
                id: next_id,
                label: code.to_string(),
                title: None,
                source: NodeSource::Course,
            });
            edges.push(GraphEdge {
                from: next_id,
                to: FOCUS_NODE_ID,
            });
            next_id += 1;
        }

        log::debug!(
            "Projected requirements of {} into {} nodes and {} edges",
            self.focus,
            nodes.len(),
            edges.len()
        );

        RequirementGraph { nodes, edges }
    }
}

/// Project a validated tree around `focus_label`
pub fn project(root: &ReqNode, focus_label: &str) -> RequirementGraph {
    Projector::new(focus_label).project(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_projection() {
        let tree = ReqNode::all(vec![
            ReqNode::course("A"),
            ReqNode::any(vec![ReqNode::course("A"), ReqNode::course("B")]),
        ]);
        let graph = project(&tree, "X");

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(
            graph.edges,
            vec![GraphEdge { from: 2, to: 1 }, GraphEdge { from: 3, to: 1 }]
        );
        assert_eq!(graph.node_by_label("A").map(|n| n.id), Some(2));
        assert_eq!(graph.node_by_label("B").map(|n| n.id), Some(3));
    }

    #[test]
    fn test_dedup_uses_normalized_codes() {
        let tree = ReqNode::any(vec![
            ReqNode::course("MATH 240"),
            ReqNode::all(vec![ReqNode::course("MATH240"), ReqNode::course("math240")]),
        ]);
        let graph = project(&tree, "COMP251");

        let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["COMP251", "MATH 240"]);
        assert_eq!(graph.edges, vec![GraphEdge { from: 2, to: 1 }]);
    }

    #[test]
    fn test_focus_node() {
        let graph = Projector::new("COMP251")
            .with_title("Algorithms and Data Structures")
            .project(&ReqNode::course("COMP250"));

        let focus = graph.focus().unwrap();
        assert_eq!(focus.id, FOCUS_NODE_ID);
        assert_eq!(focus.label, "COMP251");
        assert_eq!(focus.source, NodeSource::Focus);
        assert_eq!(focus.title.as_deref(), Some("Algorithms and Data Structures"));
        assert_eq!(graph.node(2).unwrap().source, NodeSource::Course);
    }

    #[test]
    fn test_empty_group_yields_focus_only() {
        let graph = project(&ReqNode::all(vec![]), "MATH240");
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_ids_follow_depth_first_order() {
        let tree = ReqNode::any(vec![
            ReqNode::all(vec![ReqNode::course("C"), ReqNode::course("A")]),
            ReqNode::course("B"),
            ReqNode::all(vec![ReqNode::course("A"), ReqNode::course("D")]),
        ]);
        let graph = project(&tree, "X");
        let labels: Vec<(u32, &str)> = graph
            .nodes
            .iter()
            .map(|n| (n.id, n.label.as_str()))
            .collect();
        assert_eq!(labels, vec![(1, "X"), (2, "C"), (3, "A"), (4, "B"), (5, "D")]);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let build = || {
            ReqNode::all(vec![
                ReqNode::course("MATH133"),
                ReqNode::any(vec![ReqNode::course("MATH139"), ReqNode::course("MATH140")]),
            ])
        };
        assert_eq!(project(&build(), "MATH222"), project(&build(), "MATH222"));
    }

    #[test]
    fn test_dependency_queries() {
        let tree = ReqNode::any(vec![ReqNode::course("A"), ReqNode::course("B")]);
        let graph = project(&tree, "X");

        let dependents: Vec<&str> = graph
            .dependents_of(2)
            .iter()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(dependents, vec!["X"]);

        let prereqs: Vec<&str> = graph
            .prerequisites_of(FOCUS_NODE_ID)
            .iter()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(prereqs, vec!["A", "B"]);
        assert!(graph.dependents_of(FOCUS_NODE_ID).is_empty());
    }

    #[test]
    fn test_json_shape() {
        let graph = project(&ReqNode::course("A"), "X");
        assert_eq!(
            serde_json::to_value(&graph).unwrap(),
            serde_json::json!({
                "nodes": [{"id": 1, "label": "X"}, {"id": 2, "label": "A"}],
                "edges": [{"from": 2, "to": 1}]
            })
        );

        let titled = Projector::new("X").with_title("Intro").project(&ReqNode::all(vec![]));
        assert_eq!(
            serde_json::to_value(&titled).unwrap()["nodes"][0]["title"],
            "Intro"
        );
    }
}
