use requisite_compiler::bind::CourseExpression;
use requisite_compiler::graph::{EdgeFlags, Node, NodeType, Relation};
use requisite_compiler::parse::{ParsedExpression, parse_expression};

/// Node id of the course that owns expressions parsed through `parse`.
pub const OWNER: &str = "OWNER#1";

pub fn parse(encoded: &str) -> ParsedExpression {
    parse_expression(OWNER, encoded).expect("Should parse")
}

pub fn count_type(nodes: &[Node], node_type: NodeType) -> usize {
    nodes.iter().filter(|n| n.node_type == node_type).count()
}

pub fn node_ids(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

/// Edge flags for a leaf block `<course><enforced><prereq><coreq><grade>`.
pub fn leaf_flags(enforced: bool, prereq: bool, coreq: bool, grade: &str) -> EdgeFlags {
    EdgeFlags {
        enforced: Some(enforced),
        prereq: Some(prereq),
        coreq: Some(coreq),
        minimum_grade: Some(grade.into()),
    }
}

/// Flags decoded from `{tffff}`: not enforced, neither role, grade `f`.
pub fn tffff() -> EdgeFlags {
    leaf_flags(false, false, false, "f")
}

pub fn rel(source: &str, target: &str, flags: EdgeFlags) -> Relation {
    Relation::new(source, target, flags)
}

pub fn course(code: &str, catalog: &str, encoded: impl Into<String>) -> CourseExpression {
    CourseExpression::new(code, catalog, encoded)
}

/// A small Electrical Engineering slice: 102 and 110 share requirements,
/// 3 has none.
pub fn ec_engr_courses() -> Vec<CourseExpression> {
    let json = include_str!("../fixtures/ec_engr_courses.json");
    serde_json::from_str(json).expect("Fixture should deserialize")
}
