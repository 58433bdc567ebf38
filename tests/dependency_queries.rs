//! Integration tests for the petgraph view over an assembled graph.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use requisite_compiler::batch::compile_courses;
use requisite_compiler::config::RunConfig;
use requisite_compiler::graph::{DependencyGraph, Node, Relation, RequisiteGraph};

fn ec_engr_graph() -> DependencyGraph {
    let outcome = compile_courses(&ec_engr_courses(), &RunConfig::default()).expect("Should compile");
    DependencyGraph::build(&outcome.graph).expect("Should build graph")
}

#[test]
fn requisite_leaves_walk_through_groups() {
    let graph = ec_engr_graph();
    assert_eq!(
        graph.requisite_leaves("EC ENGR#102"),
        vec!["EC ENGR#100", "EC ENGR#99", "MATH#31A"]
    );
    assert_eq!(graph.requisite_leaves("EC ENGR#100"), vec!["MATH#31A"]);
    assert!(graph.requisite_leaves("EC ENGR#3").is_empty());
    assert!(graph.requisite_leaves("NOPE#1").is_empty());
}

#[test]
fn dependents_walk_back_to_courses() {
    let graph = ec_engr_graph();
    assert_eq!(graph.dependents("MATH#31A"), vec!["EC ENGR#100", "EC ENGR#102"]);
    assert_eq!(graph.dependents("EC ENGR#100"), vec!["EC ENGR#102", "EC ENGR#110"]);
    assert_eq!(graph.dependents("EC ENGR#102"), vec!["EC ENGR#110"]);
}

#[test]
fn direct_requirements_carry_flags() {
    let graph = ec_engr_graph();
    let direct = graph.direct_requirements("(&EC ENGR#100MATH#31A)");
    assert_eq!(direct.len(), 2);
    assert!(direct.contains(&("EC ENGR#100", &leaf_flags(true, true, false, "C-"))));
    assert!(direct.contains(&("MATH#31A", &leaf_flags(true, true, false, ""))));

    let top = graph.direct_requirements("EC ENGR#110");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].0, "&EC ENGR#100EC ENGR#102");
    assert!(top[0].1.is_null());
}

#[test]
fn cycle_detection() {
    let graph = ec_engr_graph();
    assert!(!graph.has_cycle());

    let mut inputs = ec_engr_courses();
    inputs.push(course("EC ENGR", "99", "EC ENGR#110{tttf}"));
    let outcome = compile_courses(&inputs, &RunConfig::default()).expect("Should compile");
    let graph = DependencyGraph::build(&outcome.graph).expect("Should build graph");
    assert!(graph.has_cycle());
}

#[test]
fn dangling_relation_is_rejected() {
    let mut source = RequisiteGraph::new();
    source.insert_node(Node::value("MATH#31B"));
    source.insert_relation(Relation::unflagged("MATH#31B", "MATH#31A"));

    let errors = DependencyGraph::build(&source).err().expect("Should fail");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, "B001");
    assert!(errors[0].message.contains("MATH#31A"));
}
