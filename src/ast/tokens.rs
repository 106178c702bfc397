use std::fmt;

use crate::ast::RelOp;

/// Kind of a lexeme produced by the [`Lexer`](crate::lexer::Lexer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// End of input
    Eof,

    /// Field selector: a `.` optionally followed by a name
    ///
    /// # Examples
    /// ```text
    /// .
    /// .name
    /// .id
    /// ```
    ///
    /// A dotted path such as `.data.id` is two field lexemes.
    Field,

    /// Bare word that is not a keyword
    Identifier,

    // Literals
    /// `true` or `false`
    Bool,

    /// Single-quoted text, quotes included in the raw text
    ///
    /// # Examples
    /// ```text
    /// 'a'
    /// ```
    Char,

    /// Double-quoted text, quotes included in the raw text
    ///
    /// # Examples
    /// ```text
    /// "Vincent"
    /// ```
    String,

    /// Integer or decimal number with an optional sign
    ///
    /// # Examples
    /// ```text
    /// 1
    /// -10
    /// 0.3
    /// ```
    Number,

    // Punctuation
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,

    // Keywords
    /// `where`
    Where,
    /// `and`
    And,
    /// `or`
    Or,
    /// `in`
    In,
    /// `contains`
    Contains,

    // Operators
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `!`
    Not,
}

impl Token {
    pub fn is_literal(self) -> bool {
        matches!(self, Token::Bool | Token::Char | Token::String | Token::Number)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Token::Where | Token::And | Token::Or | Token::In | Token::Contains
        )
    }

    /// The relational operator this token stands for, if it is one.
    pub fn rel_op(self) -> Option<RelOp> {
        match self {
            Token::Lt => Some(RelOp::LessThan),
            Token::LtEq => Some(RelOp::LessEqual),
            Token::Gt => Some(RelOp::GreaterThan),
            Token::GtEq => Some(RelOp::GreaterEqual),
            Token::EqEq => Some(RelOp::Equal),
            Token::NotEq => Some(RelOp::NotEqual),
            Token::Not => Some(RelOp::Not),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Token::Eof => "end of input",
            Token::Field => "field",
            Token::Identifier => "identifier",
            Token::Bool => "boolean",
            Token::Char => "character",
            Token::String => "string",
            Token::Number => "number",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::Comma => "','",
            Token::Where => "'where'",
            Token::And => "'and'",
            Token::Or => "'or'",
            Token::In => "'in'",
            Token::Contains => "'contains'",
            Token::Lt => "'<'",
            Token::LtEq => "'<='",
            Token::Gt => "'>'",
            Token::GtEq => "'>='",
            Token::EqEq => "'=='",
            Token::NotEq => "'!='",
            Token::Not => "'!'",
        };
        f.write_str(s)
    }
}

/// One classified piece of query text.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    /// Byte offset of the first character in the query text
    pub pos: usize,
    /// Raw text exactly as written in the query
    pub text: String,
}

impl Lexeme {
    pub fn new(token: Token, pos: usize, text: impl Into<String>) -> Self {
        Lexeme {
            token,
            pos,
            text: text.into(),
        }
    }
}
