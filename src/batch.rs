//! Batch compilation of many courses on a bounded worker pool.
//!
//! Workers claim courses through a shared counter and keep their results
//! locally; nothing is shared mutably while they run. After the fan-in the
//! results are merged in input order, so the assembled graph does not depend
//! on scheduling. A failing course keeps its own node and course record but
//! contributes no requisites; it never affects its siblings.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::bind::{CourseContribution, CourseExpression, bind_course, course_record};
use crate::config::RunConfig;
use crate::error::CompilerError;
use crate::graph::store::RequisiteGraph;
use crate::graph::types::CourseRef;

#[derive(Debug, Clone)]
pub struct CourseFailure {
    pub course: CourseRef,
    pub error: CompilerError,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub graph: RequisiteGraph,
    /// Number of courses whose contribution made it into `graph`.
    pub compiled: usize,
    pub failures: Vec<CourseFailure>,
}

type Indexed = (usize, Result<CourseContribution, CompilerError>);

/// Compile every course and assemble one graph.
///
/// Only an invalid config fails the call as a whole. At most
/// `config.max_workers` threads are spawned, and never more than there are
/// courses.
pub fn compile_courses(
    inputs: &[CourseExpression],
    config: &RunConfig,
) -> Result<BatchOutcome, CompilerError> {
    config.validate()?;
    if inputs.is_empty() {
        return Ok(BatchOutcome::default());
    }

    let workers = config.max_workers.min(inputs.len());
    let mut results = run_workers(inputs, workers);
    results.sort_by_key(|(index, _)| *index);

    let mut outcome = BatchOutcome::default();
    for (index, result) in results {
        let course = &inputs[index].course;
        match result {
            Ok(contribution) => {
                log::debug!(
                    "Compiled requisites for {} (root: {:?})",
                    course.node_id,
                    contribution.root_id
                );
                outcome.graph.merge(contribution.graph);
                outcome.compiled += 1;
            }
            Err(error) => {
                log::warn!(
                    "Skipping requisites for {} {}: {}",
                    course.subject_area_code,
                    course.catalog_number,
                    error
                );
                outcome.graph.merge(course_record(course));
                outcome.failures.push(CourseFailure {
                    course: course.clone(),
                    error,
                });
            }
        }
    }

    log::info!(
        "Compiled {} of {} courses with {} workers: {} nodes, {} relations",
        outcome.compiled,
        inputs.len(),
        workers,
        outcome.graph.nodes().len(),
        outcome.graph.relations().len()
    );
    Ok(outcome)
}

fn run_workers(inputs: &[CourseExpression], workers: usize) -> Vec<Indexed> {
    let next_input = AtomicUsize::new(0);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let next_input = &next_input;
                s.spawn(move || {
                    let mut done = Vec::new();
                    loop {
                        let index = next_input.fetch_add(1, Ordering::Relaxed);
                        if index >= inputs.len() {
                            break;
                        }
                        done.push((index, bind_course(&inputs[index])));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(done) => done,
                Err(e) => std::panic::resume_unwind(e),
            })
            .collect()
    })
}
