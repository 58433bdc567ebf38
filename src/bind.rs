//! Binding: attach a parsed requisite expression to the course that owns it.

use serde::{Deserialize, Serialize};

use crate::error::CompilerError;
use crate::graph::store::RequisiteGraph;
use crate::graph::types::{CourseRef, Node};
use crate::parse::parse_expression;

/// One course and its encoded requisite line, as produced by the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseExpression {
    pub course: CourseRef,
    #[serde(default)]
    pub encoded: String,
}

impl CourseExpression {
    pub fn new(subject_area_code: &str, catalog_number: &str, encoded: impl Into<String>) -> Self {
        CourseExpression {
            course: CourseRef::new(subject_area_code, catalog_number),
            encoded: encoded.into(),
        }
    }
}

/// Everything one course contributes to the run-wide graph.
#[derive(Debug, Clone)]
pub struct CourseContribution {
    pub course: CourseRef,
    /// Root of the requisite expression; `None` when the course has none.
    pub root_id: Option<String>,
    pub graph: RequisiteGraph,
}

/// Parse a course's expression and bind it to the course.
///
/// The course's own Value node and course record are always present; the
/// top-level relation exists only when the expression is non-empty. A parse
/// failure yields no partial contribution; callers that still want the course
/// itself recorded use [`course_record`].
pub fn bind_course(input: &CourseExpression) -> Result<CourseContribution, CompilerError> {
    let course = &input.course;
    let parsed = parse_expression(&course.node_id, &input.encoded)
        .map_err(|e| CompilerError::from(e).for_course(course.node_id.clone()))?;

    let mut graph = course_record(course);
    let root_id = parsed.root_id.clone();
    graph.merge_expression(parsed);

    Ok(CourseContribution {
        course: course.clone(),
        root_id,
        graph,
    })
}

/// The course's own Value node and course record, with no requisites.
pub fn course_record(course: &CourseRef) -> RequisiteGraph {
    let mut graph = RequisiteGraph::new();
    graph.insert_node(Node::value(course.node_id.clone()));
    graph.insert_course(course.clone());
    graph
}
