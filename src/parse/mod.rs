//! Parse phase: encoded requisite line → canonical nodes and relations.

pub mod grammar;
pub mod leaf;
pub mod lexer;

pub use grammar::{MAX_NESTING, parse_expression};
pub use leaf::{Leaf, decode_leaf};
pub use lexer::{Token, TokenKind, tokenize};

use thiserror::Error;

use crate::graph::types::{CourseRef, Node, Relation};

/// Terminal failures for one expression. None of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed leaf '{leaf}': {reason}")]
    MalformedLeaf { leaf: String, reason: String },

    #[error("expected {}, found {found}", describe_expected(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
    },

    #[error("{production} has no members")]
    EmptyProduction { production: &'static str },

    #[error("unconsumed input starting at {found}")]
    UnconsumedInput { found: TokenKind },

    #[error("parentheses nested deeper than {limit}")]
    NestingTooDeep { limit: usize },
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::MalformedLeaf { .. } => "R001",
            ParseError::UnexpectedToken { .. } => "R002",
            ParseError::EmptyProduction { .. } => "R003",
            ParseError::UnconsumedInput { .. } => "R004",
            ParseError::NestingTooDeep { .. } => "R005",
        }
    }
}

fn describe_expected(expected: &[TokenKind]) -> String {
    expected
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Everything one course's expression contributes to the graph.
///
/// Nodes are unique by id and relations by full tuple; order follows the
/// source expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedExpression {
    /// Canonical id of the expression root. `None` for an empty expression.
    pub root_id: Option<String>,
    pub nodes: Vec<Node>,
    /// Course references found among the leaves.
    pub courses: Vec<CourseRef>,
    /// Includes the top-level relation from the owning course to the root.
    pub relations: Vec<Relation>,
}

impl ParsedExpression {
    pub fn is_empty(&self) -> bool {
        self.root_id.is_none()
    }
}
