//! Graph records shared by the parser, the assembler and the persistence export.
//!
//! These mirror the three tables the persistence collaborator upserts into:
//! nodes, courses and relations.

use serde::{Deserialize, Serialize};

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Leaf requirement: a course, a diagnostic test, or another atomic condition.
    Value,
    And,
    Or,
}

impl NodeType {
    pub fn is_structural(self) -> bool {
        !matches!(self, NodeType::Value)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeType::Value => write!(f, "value"),
            NodeType::And => write!(f, "and"),
            NodeType::Or => write!(f, "or"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

impl Node {
    pub fn value(id: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            node_type: NodeType::Value,
        }
    }

    pub fn structural(id: impl Into<String>, node_type: NodeType) -> Self {
        Node {
            id: id.into(),
            node_type,
        }
    }
}

// =============================================================================
// RELATIONS
// =============================================================================

/// Per-edge requisite attributes. All `None` on edges that point at a
/// structural node and on the top-level course edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeFlags {
    pub enforced: Option<bool>,
    pub prereq: Option<bool>,
    pub coreq: Option<bool>,
    pub minimum_grade: Option<String>,
}

impl EdgeFlags {
    pub fn null() -> Self {
        EdgeFlags::default()
    }

    pub fn is_null(&self) -> bool {
        *self == EdgeFlags::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub flags: EdgeFlags,
}

impl Relation {
    pub fn new(source: impl Into<String>, target: impl Into<String>, flags: EdgeFlags) -> Self {
        Relation {
            source: source.into(),
            target: target.into(),
            flags,
        }
    }

    pub fn unflagged(source: impl Into<String>, target: impl Into<String>) -> Self {
        Relation::new(source, target, EdgeFlags::null())
    }
}

// =============================================================================
// COURSES
// =============================================================================

/// A course's node id is always derived from its code and catalog number,
/// including when read from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCourseRef")]
pub struct CourseRef {
    pub subject_area_code: String,
    pub catalog_number: String,
    pub node_id: String,
}

impl CourseRef {
    pub fn new(subject_area_code: impl Into<String>, catalog_number: impl Into<String>) -> Self {
        let subject_area_code = subject_area_code.into();
        let catalog_number = catalog_number.into();
        let node_id = value_node_id(&subject_area_code, &catalog_number);
        CourseRef {
            subject_area_code,
            catalog_number,
            node_id,
        }
    }

    /// Split a course node id (`CODE#CATALOG`) back into its parts.
    pub fn from_node_id(node_id: &str) -> Option<Self> {
        let (code, catalog) = node_id.split_once('#')?;
        Some(CourseRef::new(code, catalog))
    }
}

/// Wire shape of a course; any `nodeId` it carries is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourseRef {
    subject_area_code: String,
    catalog_number: String,
}

impl From<RawCourseRef> for CourseRef {
    fn from(raw: RawCourseRef) -> Self {
        CourseRef::new(raw.subject_area_code, raw.catalog_number)
    }
}

/// Node id of a course: subject-area code and catalog number joined by `#`.
pub fn value_node_id(subject_area_code: &str, catalog_number: &str) -> String {
    format!("{}#{}", subject_area_code, catalog_number)
}

// =============================================================================
// LEAF FLAGS
// =============================================================================

/// Decoded flag block of one leaf. Not persisted on its own: the enforcement,
/// role and grade parts end up on the relation pointing at the leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafFlags {
    pub is_course_reference: bool,
    pub is_enforced: bool,
    pub is_prerequisite: bool,
    pub is_corequisite: bool,
    pub minimum_grade: String,
}

impl LeafFlags {
    pub fn edge_flags(&self) -> EdgeFlags {
        EdgeFlags {
            enforced: Some(self.is_enforced),
            prereq: Some(self.is_prerequisite),
            coreq: Some(self.is_corequisite),
            minimum_grade: Some(self.minimum_grade.clone()),
        }
    }
}
