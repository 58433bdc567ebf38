//! Three-state scanner for encoded requisite lines.

/// Token kinds of the encoded grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Requisite,
    LeftParen,
    RightParen,
    And,
    Or,
    End,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Requisite => write!(f, "requisite"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::And => write!(f, "'&'"),
            TokenKind::Or => write!(f, "'|'"),
            TokenKind::End => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Verbatim source span. For requisites this is the node id plus its flag block.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, text: &'a str) -> Self {
        Token { kind, text }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InLeafId,
    InLeafFlags,
}

/// Scan an encoded line into tokens. The result always ends with exactly one
/// `End` token; balance and flag contents are left to the parser and decoder.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut state = State::Start;
    let mut leaf_start = 0;

    for (pos, ch) in input.char_indices() {
        match state {
            State::Start => {
                let kind = match ch {
                    '(' => Some(TokenKind::LeftParen),
                    ')' => Some(TokenKind::RightParen),
                    '&' => Some(TokenKind::And),
                    '|' => Some(TokenKind::Or),
                    _ => None,
                };
                match kind {
                    Some(kind) => tokens.push(Token::new(kind, &input[pos..pos + ch.len_utf8()])),
                    None => {
                        leaf_start = pos;
                        state = if ch == '{' {
                            State::InLeafFlags
                        } else {
                            State::InLeafId
                        };
                    }
                }
            }
            State::InLeafId => {
                if ch == '{' {
                    state = State::InLeafFlags;
                }
            }
            State::InLeafFlags => {
                if ch == '}' {
                    let end = pos + ch.len_utf8();
                    tokens.push(Token::new(TokenKind::Requisite, &input[leaf_start..end]));
                    state = State::Start;
                }
            }
        }
    }

    // Unterminated leaf: hand it to the decoder, which rejects it.
    if state != State::Start {
        tokens.push(Token::new(TokenKind::Requisite, &input[leaf_start..]));
    }

    tokens.push(Token::new(TokenKind::End, ""));
    tokens
}
