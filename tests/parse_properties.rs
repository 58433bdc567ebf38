//! Integration tests for the parse phase: canonical ids, elision, flag propagation.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use requisite_compiler::graph::{EdgeFlags, Node, NodeType, Relation};
use requisite_compiler::parse::{ParseError, TokenKind, parse_expression};

#[test]
fn parsing_is_deterministic() {
    let encoded = "(MATH#31A{tttfC-}|MATH#31AL{tttf})&(PHYSICS#1A{tftf}|PHYSICS#1AH{tftf})";
    let first = parse(encoded);
    let second = parse(encoded);
    assert_eq!(first, second);
    assert_eq!(
        first.root_id.as_deref(),
        Some("&(|MATH#31AMATH#31AL)(|PHYSICS#1APHYSICS#1AH)")
    );
}

#[test]
fn singleton_is_its_own_value_node() {
    let parsed = parse("EC ENGR#101{tffff}");
    assert_eq!(parsed.nodes, vec![Node::value("EC ENGR#101")]);
    assert_eq!(count_type(&parsed.nodes, NodeType::And), 0);
    assert_eq!(count_type(&parsed.nodes, NodeType::Or), 0);
    assert_eq!(
        parsed.relations,
        vec![Relation::unflagged(OWNER, "EC ENGR#101")]
    );
    assert!(parsed.relations[0].flags.is_null());
}

#[test]
fn conjunction_synthesizes_one_and_node() {
    let parsed = parse("A{tffff}&B{tffff}");
    assert_eq!(node_ids(&parsed.nodes), vec!["A", "B", "&AB"]);
    assert_eq!(
        parsed.nodes[2],
        Node::structural("&AB", NodeType::And)
    );
    assert_eq!(
        parsed.relations,
        vec![
            rel("&AB", "A", tffff()),
            rel("&AB", "B", tffff()),
            Relation::unflagged(OWNER, "&AB"),
        ]
    );
}

#[test]
fn nested_disjunction_parenthesizes_inner_group() {
    let parsed = parse("(A{tffff}&B{tffff})|C{tffff}");
    assert_eq!(parsed.root_id.as_deref(), Some("|(&AB)C"));
    assert_eq!(node_ids(&parsed.nodes), vec!["A", "B", "C", "(&AB)", "|(&AB)C"]);
    assert_eq!(count_type(&parsed.nodes, NodeType::And), 1);
    assert_eq!(count_type(&parsed.nodes, NodeType::Or), 1);

    let relations = &parsed.relations;
    assert_eq!(relations.len(), 5);
    assert!(relations.contains(&rel("|(&AB)C", "(&AB)", EdgeFlags::null())));
    assert!(relations.contains(&rel("|(&AB)C", "C", tffff())));
    assert!(relations.contains(&rel("(&AB)", "A", tffff())));
    assert!(relations.contains(&rel("(&AB)", "B", tffff())));
    assert!(relations.contains(&Relation::unflagged(OWNER, "|(&AB)C")));
}

#[test]
fn conjunction_binds_tighter_than_disjunction() {
    let parsed = parse("A{ffff}|B{ffff}&C{ffff}");
    assert_eq!(parsed.root_id.as_deref(), Some("|A&BC"));
    assert!(parsed.nodes.contains(&Node::structural("&BC", NodeType::And)));
}

#[test]
fn chains_are_n_ary() {
    let parsed = parse("A{ffff}&B{ffff}&C{ffff}");
    assert_eq!(parsed.root_id.as_deref(), Some("&ABC"));
    assert_eq!(count_type(&parsed.nodes, NodeType::And), 1);
    // Three member edges plus the top-level edge.
    assert_eq!(parsed.relations.len(), 4);
}

#[test]
fn parenthesized_leaf_keeps_identity_and_flags() {
    let parsed = parse("(MATH#31A{tttfB})");
    assert_eq!(parsed.root_id.as_deref(), Some("MATH#31A"));
    assert_eq!(parsed.nodes, vec![Node::value("MATH#31A")]);

    let parsed = parse("(MATH#31A{tttfB})&PHYSICS#1A{tftf}");
    assert!(parsed.relations.contains(&rel(
        "&MATH#31APHYSICS#1A",
        "MATH#31A",
        leaf_flags(true, true, false, "B")
    )));
}

#[test]
fn leaf_flags_land_on_relations() {
    let parsed = parse("MATH#31A{tttfC-}|Mathematics diagnostic test{fftt}");
    assert!(parsed.relations.contains(&rel(
        "|MATH#31AMathematics diagnostic test",
        "MATH#31A",
        leaf_flags(true, true, false, "C-")
    )));
    assert!(parsed.relations.contains(&rel(
        "|MATH#31AMathematics diagnostic test",
        "Mathematics diagnostic test",
        leaf_flags(false, true, true, "")
    )));
}

#[test]
fn course_leaves_are_recorded_as_courses() {
    let parsed = parse("MATH#31A{tttf}&Entry-level Writing{fttf}");
    assert_eq!(parsed.courses.len(), 1);
    assert_eq!(parsed.courses[0].subject_area_code, "MATH");
    assert_eq!(parsed.courses[0].catalog_number, "31A");
    assert_eq!(parsed.courses[0].node_id, "MATH#31A");
}

#[test]
fn repeated_leaf_is_emitted_once() {
    let parsed = parse("A{ffff}|(A{ffff}&B{ffff})");
    assert_eq!(node_ids(&parsed.nodes), vec!["A", "B", "(&AB)", "|A(&AB)"]);
}

#[test]
fn empty_input_is_a_no_op() {
    let parsed = parse_expression(OWNER, "").unwrap();
    assert!(parsed.is_empty());
    assert!(parsed.nodes.is_empty());
    assert!(parsed.relations.is_empty());
    assert!(parsed.courses.is_empty());
}

#[test]
fn unmatched_left_paren_fails_at_end() {
    let err = parse_expression(OWNER, "(A{tffff}").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: vec![TokenKind::RightParen],
            found: TokenKind::End,
        }
    );
}

#[test]
fn dangling_connective_fails() {
    let err = parse_expression(OWNER, "A{tffff}&").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: vec![TokenKind::Requisite, TokenKind::LeftParen],
            found: TokenKind::End,
        }
    );
}

#[test]
fn trailing_tokens_are_unconsumed_input() {
    let err = parse_expression(OWNER, "A{tffff})").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnconsumedInput {
            found: TokenKind::RightParen
        }
    );

    let err = parse_expression(OWNER, "A{tffff}B{tffff}").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnconsumedInput {
            found: TokenKind::Requisite
        }
    );
}

#[test]
fn malformed_leaf_aborts_whole_expression() {
    let err = parse_expression(OWNER, "A{tffff}|B{tfzf}").unwrap_err();
    assert!(matches!(err, ParseError::MalformedLeaf { ref leaf, .. } if leaf == "B{tfzf}"));
    assert_eq!(err.code(), "R001");
}

#[test]
fn truncated_leaf_is_malformed() {
    let err = parse_expression(OWNER, "A{tffff}&B{tf").unwrap_err();
    assert!(matches!(err, ParseError::MalformedLeaf { .. }));
}

#[test]
fn error_messages_name_tokens() {
    let err = parse_expression(OWNER, "A{tffff}&").unwrap_err();
    assert_eq!(err.to_string(), "expected requisite or '(', found end of input");
}
