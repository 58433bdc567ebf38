//! Run-wide graph accumulation with idempotent-upsert semantics.
//!
//! Nodes and courses are keyed by node id (first writer wins); relations are
//! kept once per full attribute tuple. Insertion order is preserved so that
//! exports are deterministic.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::types::{CourseRef, EdgeFlags, Node, NodeType, Relation};
use crate::parse::ParsedExpression;

/// Flat collections handed to the persistence collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<Node>,
    pub courses: Vec<CourseRef>,
    pub relations: Vec<Relation>,
}

/// A node id that was offered again with a different type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConflict {
    pub id: String,
    pub kept: NodeType,
    pub rejected: NodeType,
}

#[derive(Debug, Clone, Default)]
pub struct RequisiteGraph {
    nodes: Vec<Node>,
    node_types: HashMap<String, NodeType>,
    courses: Vec<CourseRef>,
    course_ids: HashSet<String>,
    relations: Vec<Relation>,
    relation_set: HashSet<Relation>,
    conflicts: Vec<TypeConflict>,
}

impl RequisiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-if-id-absent. Returns `true` when the node was new.
    pub fn insert_node(&mut self, node: Node) -> bool {
        match self.node_types.get(&node.id) {
            Some(&kept) => {
                if kept != node.node_type {
                    log::warn!(
                        "Node '{}' already recorded as {}, ignoring {}",
                        node.id,
                        kept,
                        node.node_type
                    );
                    self.conflicts.push(TypeConflict {
                        id: node.id,
                        kept,
                        rejected: node.node_type,
                    });
                }
                false
            }
            None => {
                self.node_types.insert(node.id.clone(), node.node_type);
                self.nodes.push(node);
                true
            }
        }
    }

    /// Insert-if-id-absent, keyed by the course's node id.
    pub fn insert_course(&mut self, course: CourseRef) -> bool {
        if !self.course_ids.insert(course.node_id.clone()) {
            return false;
        }
        self.courses.push(course);
        true
    }

    /// Insert-if-tuple-absent.
    pub fn insert_relation(&mut self, relation: Relation) -> bool {
        if self.relation_set.contains(&relation) {
            return false;
        }
        self.relation_set.insert(relation.clone());
        self.relations.push(relation);
        true
    }

    /// Merge one course's parsed expression.
    pub fn merge_expression(&mut self, parsed: ParsedExpression) {
        let ParsedExpression {
            nodes,
            courses,
            relations,
            ..
        } = parsed;
        self.merge_parts(nodes, courses, relations);
    }

    /// Merge another accumulation into this one, in its insertion order.
    pub fn merge(&mut self, other: RequisiteGraph) {
        let RequisiteGraph {
            nodes,
            courses,
            relations,
            conflicts,
            ..
        } = other;
        self.conflicts.extend(conflicts);
        self.merge_parts(nodes, courses, relations);
    }

    fn merge_parts(&mut self, nodes: Vec<Node>, courses: Vec<CourseRef>, relations: Vec<Relation>) {
        for node in nodes {
            self.insert_node(node);
        }
        for course in courses {
            self.insert_course(course);
        }
        for relation in relations {
            self.insert_relation(relation);
        }
    }

    pub fn node_type(&self, id: &str) -> Option<NodeType> {
        self.node_types.get(id).copied()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_types.contains_key(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn courses(&self) -> &[CourseRef] {
        &self.courses
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn conflicts(&self) -> &[TypeConflict] {
        &self.conflicts
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.courses.is_empty() && self.relations.is_empty()
    }

    pub fn export(&self) -> GraphExport {
        GraphExport {
            nodes: self.nodes.clone(),
            courses: self.courses.clone(),
            relations: self.relations.clone(),
        }
    }

    /// Line-per-record listing, in insertion order.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for node in &self.nodes {
            lines.push(format!("node {} {}", node.node_type, node.id));
        }
        for course in &self.courses {
            lines.push(format!(
                "course {} / {} = {}",
                course.subject_area_code, course.catalog_number, course.node_id
            ));
        }
        for relation in &self.relations {
            lines.push(format!(
                "rel {} -> {} {}",
                relation.source,
                relation.target,
                render_flags(&relation.flags)
            ));
        }
        lines.join("\n")
    }

    pub fn into_export(self) -> GraphExport {
        GraphExport {
            nodes: self.nodes,
            courses: self.courses,
            relations: self.relations,
        }
    }
}

fn render_flags(flags: &EdgeFlags) -> String {
    if flags.is_null() {
        return "[-]".to_string();
    }
    let bit = |b: Option<bool>| match b {
        Some(true) => 't',
        Some(false) => 'f',
        None => '-',
    };
    format!(
        "[{}{}{} {}]",
        bit(flags.enforced),
        bit(flags.prereq),
        bit(flags.coreq),
        flags.minimum_grade.as_deref().unwrap_or("-")
    )
}
