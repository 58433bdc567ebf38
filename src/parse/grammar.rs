//! Recursive-descent parser over the token stream.
//!
//! ```text
//! Start      := Expression End
//! Expression := Term Terms
//! Terms      := ε | Or Term Terms
//! Term       := Factor Factors
//! Factors    := ε | And Factor Factors
//! Factor     := Requisite | LeftParen Expression RightParen
//! ```
//!
//! Canonical ids make structurally identical subexpressions collide on the same
//! node across courses:
//!
//! - a leaf keeps its node id verbatim (flags excluded);
//! - a conjunction/disjunction is `&` / `|` followed by its member ids in source order;
//! - a group inside parentheses becomes `(` + id + `)`.
//!
//! A Term or Expression with a single member is that member: no And/Or node is
//! synthesized, so a lone requirement keeps its Value identity. Structural
//! nodes are only materialized once their final id is known, that is when they
//! become a member of an enclosing group or the expression root.

use super::leaf::decode_leaf;
use super::lexer::{Token, TokenKind, tokenize};
use super::{ParseError, ParsedExpression};
use crate::graph::store::RequisiteGraph;
use crate::graph::types::{EdgeFlags, Node, NodeType, Relation};

/// Deepest parenthesized group accepted in one expression.
pub const MAX_NESTING: usize = 256;

/// Parse one course's encoded requisite line.
///
/// `owner_node_id` is the course the expression belongs to; the result carries
/// one unflagged relation from it to the expression root. An empty line is no
/// expression at all: nothing is emitted and no error is raised.
pub fn parse_expression(owner_node_id: &str, encoded: &str) -> Result<ParsedExpression, ParseError> {
    if encoded.is_empty() {
        return Ok(ParsedExpression::default());
    }

    let mut parser = Parser::new(tokenize(encoded));
    let root_id = parser.start(owner_node_id)?;
    let export = parser.out.into_export();

    Ok(ParsedExpression {
        root_id: Some(root_id),
        nodes: export.nodes,
        courses: export.courses,
        relations: export.relations,
    })
}

/// Edge from a structural node to one of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MemberEdge {
    target: String,
    flags: EdgeFlags,
}

/// What a rule hands back: a leaf (already emitted) or a structural group
/// waiting to be materialized under its final id.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Leaf {
        id: String,
        flags: EdgeFlags,
    },
    Group {
        node_type: NodeType,
        id: String,
        members: Vec<MemberEdge>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl Connective {
    fn node_type(self) -> NodeType {
        match self {
            Connective::And => NodeType::And,
            Connective::Or => NodeType::Or,
        }
    }

    fn symbol(self) -> char {
        match self {
            Connective::And => '&',
            Connective::Or => '|',
        }
    }

    fn production(self) -> &'static str {
        match self {
            Connective::And => "term",
            Connective::Or => "expression",
        }
    }
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    /// Currently open parentheses.
    depth: usize,
    out: RequisiteGraph,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token<'a>>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            out: RequisiteGraph::new(),
        }
    }

    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map_or(TokenKind::End, |t| t.kind)
    }

    fn eat(&mut self, kind: TokenKind) -> Result<&'a str, ParseError> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == kind => {
                let text = token.text;
                self.pos += 1;
                Ok(text)
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: vec![kind],
                found: self.peek(),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Start := Expression End
    // -------------------------------------------------------------------------

    fn start(&mut self, owner_node_id: &str) -> Result<String, ParseError> {
        let root = self.expression()?;

        let found = self.peek();
        if found != TokenKind::End {
            return Err(ParseError::UnconsumedInput { found });
        }

        let root = self.materialize(root);
        self.out
            .insert_relation(Relation::unflagged(owner_node_id, root.target.clone()));
        Ok(root.target)
    }

    // -------------------------------------------------------------------------
    // Expression := Term Terms
    // Terms      := ε | Or Term Terms
    // -------------------------------------------------------------------------

    fn expression(&mut self) -> Result<Operand, ParseError> {
        let mut members = vec![self.term()?];
        self.terms(&mut members)?;
        self.combine(Connective::Or, members)
    }

    // Loops rather than recursing, so long chains cost no stack.
    fn terms(&mut self, members: &mut Vec<Operand>) -> Result<(), ParseError> {
        while self.peek() == TokenKind::Or {
            self.eat(TokenKind::Or)?;
            members.push(self.term()?);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Term    := Factor Factors
    // Factors := ε | And Factor Factors
    // -------------------------------------------------------------------------

    fn term(&mut self) -> Result<Operand, ParseError> {
        let mut members = vec![self.factor()?];
        self.factors(&mut members)?;
        self.combine(Connective::And, members)
    }

    fn factors(&mut self, members: &mut Vec<Operand>) -> Result<(), ParseError> {
        while self.peek() == TokenKind::And {
            self.eat(TokenKind::And)?;
            members.push(self.factor()?);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Factor := Requisite | LeftParen Expression RightParen
    // -------------------------------------------------------------------------

    fn factor(&mut self) -> Result<Operand, ParseError> {
        match self.peek() {
            TokenKind::Requisite => {
                let span = self.eat(TokenKind::Requisite)?;
                let leaf = decode_leaf(span)?;

                self.out.insert_node(Node::value(leaf.node_id));
                if let Some(course) = leaf.course() {
                    self.out.insert_course(course);
                }

                Ok(Operand::Leaf {
                    id: leaf.node_id.to_string(),
                    flags: leaf.flags.edge_flags(),
                })
            }
            TokenKind::LeftParen => {
                self.eat(TokenKind::LeftParen)?;
                if self.depth == MAX_NESTING {
                    return Err(ParseError::NestingTooDeep { limit: MAX_NESTING });
                }
                self.depth += 1;
                let inner = self.expression()?;
                self.eat(TokenKind::RightParen)?;
                self.depth -= 1;

                Ok(match inner {
                    // A leaf's id is externally supplied; parentheses cannot rename it.
                    leaf @ Operand::Leaf { .. } => leaf,
                    Operand::Group {
                        node_type,
                        id,
                        members,
                    } => Operand::Group {
                        node_type,
                        id: format!("({})", id),
                        members,
                    },
                })
            }
            found => Err(ParseError::UnexpectedToken {
                expected: vec![TokenKind::Requisite, TokenKind::LeftParen],
                found,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Node synthesis
    // -------------------------------------------------------------------------

    /// Fold the members of a Term (And) or Expression (Or).
    fn combine(&mut self, connective: Connective, members: Vec<Operand>) -> Result<Operand, ParseError> {
        if members.is_empty() {
            return Err(ParseError::EmptyProduction {
                production: connective.production(),
            });
        }
        let members = match <[Operand; 1]>::try_from(members) {
            Ok([only]) => return Ok(only),
            Err(members) => members,
        };

        let mut id = String::from(connective.symbol());
        let mut edges = Vec::with_capacity(members.len());
        for member in members {
            let edge = self.materialize(member);
            id.push_str(&edge.target);
            edges.push(edge);
        }

        Ok(Operand::Group {
            node_type: connective.node_type(),
            id,
            members: edges,
        })
    }

    /// Emit a pending group under its final id and return the edge pointing at
    /// it. Leaves were emitted when scanned and keep their own flags.
    fn materialize(&mut self, operand: Operand) -> MemberEdge {
        match operand {
            Operand::Leaf { id, flags } => MemberEdge { target: id, flags },
            Operand::Group {
                node_type,
                id,
                members,
            } => {
                self.out.insert_node(Node::structural(id.clone(), node_type));
                for member in members {
                    self.out
                        .insert_relation(Relation::new(id.clone(), member.target, member.flags));
                }
                MemberEdge {
                    target: id,
                    flags: EdgeFlags::null(),
                }
            }
        }
    }
}
