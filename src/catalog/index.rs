//! Catalog-wide reverse dependency index
//!
//! Answers "what depends on this course" across many course records.
//! Edges run from a prerequisite to the course that requires it, the same
//! direction as [`RequirementGraph`](crate::requirement::RequirementGraph)
//! edges.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use petgraph::Direction;
use std::collections::HashMap;

use super::course::Course;
use crate::requirement::normalize_code;

/// Prerequisite graph over a set of course records
#[derive(Debug, Default)]
pub struct DependencyIndex {
    graph: DiGraph<String, ()>,
    /// Normalized course code to node
    nodes: HashMap<String, NodeIndex>,
}

impl DependencyIndex {
    /// Build from course records.
    ///
    /// Referenced codes without a record of their own still get a node.
    pub fn from_courses(courses: &[Course]) -> Self {
        let mut index = Self::default();
        for course in courses {
            let dependent = index.node_for(&course.id);
            for code in course.prerequisite_codes() {
                let prerequisite = index.node_for(&code);
                index.graph.update_edge(prerequisite, dependent, ());
            }
        }
        log::debug!(
            "Built dependency index with {} courses and {} links",
            index.graph.node_count(),
            index.graph.edge_count()
        );
        index
    }

    fn node_for(&mut self, code: &str) -> NodeIndex {
        let key = normalize_code(code);
        if let Some(idx) = self.nodes.get(&key) {
            return *idx;
        }
        let idx = self.graph.add_node(key.clone());
        self.nodes.insert(key, idx);
        idx
    }

    fn lookup(&self, code: &str) -> Option<NodeIndex> {
        self.nodes.get(&normalize_code(code)).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Courses that directly require `code`, sorted
    pub fn leading_to(&self, code: &str) -> Vec<String> {
        self.neighbors(code, Direction::Outgoing)
    }

    /// Courses `code` directly requires, sorted
    pub fn prerequisites_of(&self, code: &str) -> Vec<String> {
        self.neighbors(code, Direction::Incoming)
    }

    fn neighbors(&self, code: &str, direction: Direction) -> Vec<String> {
        let Some(idx) = self.lookup(code) else {
            return Vec::new();
        };
        let mut out: Vec<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect();
        out.sort();
        out
    }

    /// Every course reachable through `leading_to`, sorted, excluding `code`
    pub fn all_dependents(&self, code: &str) -> Vec<String> {
        let Some(start) = self.lookup(code) else {
            return Vec::new();
        };
        let mut bfs = Bfs::new(&self.graph, start);
        let mut out = Vec::new();
        while let Some(n) = bfs.next(&self.graph) {
            if n != start {
                out.push(self.graph[n].clone());
            }
        }
        out.sort();
        out
    }

    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// Groups of courses that require each other, each sorted
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut codes: Vec<String> =
                    scc.into_iter().map(|n| self.graph[n].clone()).collect();
                codes.sort();
                codes
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Fill each record's `leading_to` from the index
    pub fn annotate(&self, courses: Vec<Course>) -> Vec<Course> {
        courses
            .into_iter()
            .map(|course| {
                let leading_to = self.leading_to(&course.id);
                Course {
                    leading_to,
                    ..course
                }
            })
            .collect()
    }
}
