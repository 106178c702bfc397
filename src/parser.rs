use thiserror::Error;
use tracing::trace;

use crate::{
    ast::{Lexeme, Node, Number, RelOp, Token},
    lexer::{LexError, Lexer},
};

/// Errors raised while building the syntax tree.
///
/// Any error abandons the tree being built; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected token {token} {text:?} at position {pos}")]
    UnexpectedToken {
        token: Token,
        text: String,
        pos: usize,
    },

    #[error("bad number syntax: {text:?} at position {pos}")]
    BadNumberSyntax { text: String, pos: usize },

    /// Binary expression missing its left or right operand
    #[error("incomplete binary expression at position {pos}")]
    IncompleteExpression { pos: usize },

    #[error("missing ')' before end of input at position {pos}")]
    UnclosedParen { pos: usize },

    /// Condition nests deeper than [`MAX_DEPTH`] groups or holds more than
    /// [`MAX_OPERATORS`] operators
    #[error("condition nested too deeply at position {pos}")]
    TooDeep { pos: usize },

    /// `where` not followed by a comparison, `and`, `or`, `in` or `contains` expression
    #[error("unexpected condition at position {pos}: expected a comparison, 'and', 'or', 'in' or 'contains' expression")]
    InvalidCondition { pos: usize },
}

impl ParseError {
    fn unexpected(lexeme: &Lexeme) -> Self {
        ParseError::UnexpectedToken {
            token: lexeme.token,
            text: lexeme.text.clone(),
            pos: lexeme.pos,
        }
    }
}

/// Deepest parenthesis nesting accepted inside a condition.
pub const MAX_DEPTH: usize = 64;

/// Most operators accepted in one query.
///
/// Every operator wraps the tree built so far, so this also bounds the depth
/// of the resulting tree.
pub const MAX_OPERATORS: usize = 512;

/// Binary node kinds a condition operator can open.
#[derive(Debug, Clone, Copy)]
enum BinaryKind {
    And,
    Or,
    In,
    Contains,
    Operation(RelOp),
}

impl BinaryKind {
    fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::And => Some(BinaryKind::And),
            Token::Or => Some(BinaryKind::Or),
            Token::In => Some(BinaryKind::In),
            Token::Contains => Some(BinaryKind::Contains),
            t => t.rel_op().map(BinaryKind::Operation),
        }
    }

    fn build(self, left: Node, right: Node) -> Node {
        let (left, right) = (Box::new(left), Box::new(right));
        match self {
            BinaryKind::And => Node::And { left, right },
            BinaryKind::Or => Node::Or { left, right },
            BinaryKind::In => Node::In { left, right },
            BinaryKind::Contains => Node::Contains { left, right },
            BinaryKind::Operation(op) => Node::Operation { op, left, right },
        }
    }
}

/// The node a condition is currently building.
enum Current {
    /// A finished operand or expression
    Done(Node),
    /// A binary node still waiting for its right operand
    Open {
        kind: BinaryKind,
        left: Option<Node>,
        pos: usize,
    },
}

/// Recursive-descent parser over a [`Lexer`].
///
/// Keeps a single lexeme of lookahead that can be pushed back.
pub struct Parser {
    lexer: Lexer,
    peeked: Option<Lexeme>,
    operators: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser {
            lexer,
            peeked: None,
            operators: 0,
        }
    }

    fn next_lexeme(&mut self) -> Result<Lexeme, ParseError> {
        match self.peeked.take() {
            Some(lexeme) => Ok(lexeme),
            None => Ok(self.lexer.next_lexeme()?),
        }
    }

    fn peek(&mut self) -> Result<&Lexeme, ParseError> {
        let lexeme = match self.peeked.take() {
            Some(lexeme) => lexeme,
            None => self.lexer.next_lexeme()?,
        };
        Ok(self.peeked.insert(lexeme))
    }

    fn backup(&mut self, lexeme: Lexeme) {
        self.peeked = Some(lexeme);
    }

    /// Parse a complete query into a [`Node::Sequence`].
    ///
    /// Commas between selectors are skipped, as is any stray lexeme that
    /// cannot start a selector or a `where` clause, except grouping
    /// punctuation which only makes sense inside a condition.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let mut nodes = vec![];

        loop {
            let lexeme = self.peek()?;
            match lexeme.token {
                Token::Eof => break,
                Token::Field => nodes.push(self.parse_chain()?),
                Token::Where => nodes.push(self.parse_where()?),
                Token::LParen | Token::RParen | Token::LBracket | Token::RBracket => {
                    return Err(ParseError::unexpected(lexeme));
                }
                _ => {
                    trace!(token = %lexeme.token, pos = lexeme.pos, "skipping stray lexeme");
                    self.next_lexeme()?;
                }
            }
        }

        Ok(Node::Sequence(nodes))
    }

    /// Concatenate consecutive field lexemes into one dotted path.
    fn parse_chain(&mut self) -> Result<Node, ParseError> {
        let mut chain = String::new();

        loop {
            let lexeme = self.next_lexeme()?;
            if lexeme.token != Token::Field {
                self.backup(lexeme);
                break;
            }
            chain.push_str(&lexeme.text);
        }

        Ok(Node::Chain(chain))
    }

    fn parse_where(&mut self) -> Result<Node, ParseError> {
        let pos = self.next_lexeme()?.pos; // consume 'where'

        match self.parse_condition(0)? {
            Some(condition) if condition.is_condition() => Ok(Node::Where(Box::new(condition))),
            _ => Err(ParseError::InvalidCondition { pos }),
        }
    }

    /// Parse a condition up to the matching `)`, or to end of input at depth 0.
    ///
    /// Operators are folded in as they appear: a new operator takes the
    /// expression built so far as its left operand, and the next operand
    /// completes it. Only parentheses group.
    fn parse_condition(&mut self, depth: usize) -> Result<Option<Node>, ParseError> {
        let mut current: Option<Current> = None;

        loop {
            let lexeme = self.peek()?.clone();

            if let Some(kind) = BinaryKind::from_token(lexeme.token) {
                self.operators += 1;
                if self.operators > MAX_OPERATORS {
                    return Err(ParseError::TooDeep { pos: lexeme.pos });
                }
                self.next_lexeme()?;
                let left = match current {
                    None => None,
                    Some(Current::Done(node)) => Some(node),
                    Some(Current::Open { pos, .. }) => {
                        return Err(ParseError::IncompleteExpression { pos });
                    }
                };
                current = Some(Current::Open {
                    kind,
                    left,
                    pos: lexeme.pos,
                });
                continue;
            }

            match lexeme.token {
                Token::Eof => {
                    if depth > 0 {
                        return Err(ParseError::UnclosedParen { pos: lexeme.pos });
                    }
                    break;
                }
                Token::Field => {
                    let chain = self.parse_chain()?;
                    current = Some(attach(current, chain, &lexeme)?);
                }
                t if t.is_literal() => {
                    let literal = self.parse_literal()?;
                    current = Some(attach(current, literal, &lexeme)?);
                }
                Token::LBracket => {
                    if !matches!(current, Some(Current::Open { .. })) {
                        return Err(ParseError::unexpected(&lexeme));
                    }
                    let seq = self.parse_literal_seq()?;
                    current = Some(attach(current, seq, &lexeme)?);
                }
                Token::LParen => {
                    if depth >= MAX_DEPTH {
                        return Err(ParseError::TooDeep { pos: lexeme.pos });
                    }
                    self.next_lexeme()?;
                    if let Some(group) = self.parse_condition(depth + 1)? {
                        current = Some(attach(current, group, &lexeme)?);
                    }
                }
                Token::RParen => {
                    if depth == 0 {
                        return Err(ParseError::unexpected(&lexeme));
                    }
                    self.next_lexeme()?;
                    return finish(current);
                }
                _ => return Err(ParseError::unexpected(&lexeme)),
            }
        }

        finish(current)
    }

    fn parse_literal(&mut self) -> Result<Node, ParseError> {
        let lexeme = self.next_lexeme()?;
        match lexeme.token {
            Token::Bool => Ok(Node::Bool(lexeme.text == "true")),
            Token::Char | Token::String => Ok(Node::Text(lexeme.text)),
            Token::Number => parse_number(&lexeme),
            _ => Err(ParseError::unexpected(&lexeme)),
        }
    }

    /// Parse `[literal, ...]`.
    ///
    /// Only literals and commas may appear before the closing bracket.
    fn parse_literal_seq(&mut self) -> Result<Node, ParseError> {
        self.next_lexeme()?; // consume '['

        let mut nodes = vec![];
        loop {
            let lexeme = self.peek()?;
            match lexeme.token {
                Token::Comma => {
                    self.next_lexeme()?;
                }
                Token::RBracket => {
                    self.next_lexeme()?;
                    return Ok(Node::Sequence(nodes));
                }
                t if t.is_literal() => nodes.push(self.parse_literal()?),
                _ => return Err(ParseError::unexpected(lexeme)),
            }
        }
    }
}

/// Place an operand: it either starts the expression or completes the open binary node.
fn attach(current: Option<Current>, operand: Node, at: &Lexeme) -> Result<Current, ParseError> {
    match current {
        None => Ok(Current::Done(operand)),
        Some(Current::Open {
            kind,
            left: Some(left),
            ..
        }) => Ok(Current::Done(kind.build(left, operand))),
        Some(Current::Open { left: None, pos, .. }) => {
            Err(ParseError::IncompleteExpression { pos })
        }
        Some(Current::Done(_)) => Err(ParseError::unexpected(at)),
    }
}

fn finish(current: Option<Current>) -> Result<Option<Node>, ParseError> {
    match current {
        None => Ok(None),
        Some(Current::Done(node)) => Ok(Some(node)),
        Some(Current::Open { pos, .. }) => Err(ParseError::IncompleteExpression { pos }),
    }
}

/// Numbers containing `.` or `e` are floats, everything else is an integer.
fn parse_number(lexeme: &Lexeme) -> Result<Node, ParseError> {
    let bad = || ParseError::BadNumberSyntax {
        text: lexeme.text.clone(),
        pos: lexeme.pos,
    };

    if lexeme.text.contains(['.', 'e']) {
        lexeme
            .text
            .parse::<f64>()
            .map(|n| Node::Number(Number::Float(n)))
            .map_err(|_| bad())
    } else {
        lexeme
            .text
            .parse::<i64>()
            .map(|n| Node::Number(Number::Integer(n)))
            .map_err(|_| bad())
    }
}

/// Tokenize and parse query text in one step.
pub fn parse(query: &str) -> Result<Node, ParseError> {
    Parser::new(Lexer::new(query)).parse()
}
