//! petgraph-based directed view of an assembled requisite graph.
//!
//! Edges point from a requirer to its requirement: course → expression root →
//! ... → leaf. Parallel edges are kept, since the same target can be required
//! with different attributes.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::store::RequisiteGraph;
use super::types::{EdgeFlags, NodeType};
use crate::error::CompilerError;

pub struct DependencyGraph {
    pub graph: DiGraph<(String, NodeType), EdgeFlags>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn build(source: &RequisiteGraph) -> Result<Self, Vec<CompilerError>> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut errors = Vec::new();

        for node in source.nodes() {
            let idx = graph.add_node((node.id.clone(), node.node_type));
            node_indices.insert(node.id.clone(), idx);
        }

        for relation in source.relations() {
            let source_idx = node_indices.get(&relation.source);
            let target_idx = node_indices.get(&relation.target);

            match (source_idx, target_idx) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(s, t, relation.flags.clone());
                }
                (None, _) => {
                    errors.push(CompilerError::bind(
                        "B001",
                        format!(
                            "Relation to '{}' references unknown source node '{}'",
                            relation.target, relation.source
                        ),
                        None,
                    ));
                }
                (_, None) => {
                    errors.push(CompilerError::bind(
                        "B001",
                        format!(
                            "Relation from '{}' references unknown target node '{}'",
                            relation.source, relation.target
                        ),
                        None,
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DependencyGraph { graph, node_indices })
    }

    fn id(&self, idx: NodeIndex) -> &str {
        self.graph[idx].0.as_str()
    }

    fn is_value(&self, idx: NodeIndex) -> bool {
        !self.graph[idx].1.is_structural()
    }

    /// Outgoing edges of `id` with their attributes, one entry per edge.
    pub fn direct_requirements(&self, id: &str) -> Vec<(&str, &EdgeFlags)> {
        let Some(&idx) = self.node_indices.get(id) else {
            return vec![];
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (self.id(e.target()), e.weight()))
            .collect()
    }

    /// Leaf requirements that must precede `id`: Value nodes reached through
    /// And/Or nodes only. Courses found this way are not expanded further.
    pub fn requisite_leaves(&self, id: &str) -> Vec<&str> {
        self.walk_through_structural(id, Direction::Outgoing)
    }

    /// Value nodes (usually courses) whose requisite expression reaches `id`.
    pub fn dependents(&self, id: &str) -> Vec<&str> {
        self.walk_through_structural(id, Direction::Incoming)
    }

    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    fn walk_through_structural(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(&start) = self.node_indices.get(id) else {
            return vec![];
        };

        let mut found = Vec::new();
        let mut seen = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            for next in self.graph.neighbors_directed(idx, direction) {
                if !seen.insert(next) {
                    continue;
                }
                if self.is_value(next) {
                    found.push(self.id(next));
                } else {
                    stack.push(next);
                }
            }
        }

        found.sort_unstable();
        found
    }
}
