//! Graph model, run-wide assembly, and dependency queries.

pub mod query;
pub mod store;
pub mod types;

pub use query::DependencyGraph;
pub use store::{GraphExport, RequisiteGraph, TypeConflict};
pub use types::*;
