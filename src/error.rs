//! Unified compiler error type used across all phases.

use crate::parse::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Encode,
    Parse,
    Bind,
    Config,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Encode => write!(f, "Encode"),
            Phase::Parse => write!(f, "Parse"),
            Phase::Bind => write!(f, "Bind"),
            Phase::Config => write!(f, "Config"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    /// Node id of the owning course, when the error belongs to one.
    pub node_id: Option<String>,
}

impl std::fmt::Display for CompilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (course '{}')",
                self.phase, self.code, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for CompilerError {}

impl From<ParseError> for CompilerError {
    fn from(e: ParseError) -> Self {
        CompilerError {
            code: e.code().to_string(),
            phase: Phase::Parse,
            message: e.to_string(),
            node_id: None,
        }
    }
}

impl CompilerError {
    pub fn encode(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Encode,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn bind(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Bind,
            message: message.into(),
            node_id,
        }
    }

    pub fn config(code: &str, message: impl Into<String>) -> Self {
        CompilerError {
            code: code.into(),
            phase: Phase::Config,
            message: message.into(),
            node_id: None,
        }
    }

    /// Attach the owning course's node id.
    pub fn for_course(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }
}
