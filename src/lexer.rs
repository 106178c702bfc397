use thiserror::Error;
use tracing::trace;

use crate::ast::{Lexeme, Token};

/// Errors raised while splitting query text into lexemes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A character that cannot start any lexeme
    #[error("query is malformed: unexpected character {ch:?} at position {pos}")]
    MalformedQuery { ch: char, pos: usize },

    /// A lone `=`
    #[error("expected '=' after '=' at position {pos} (did you mean '=='?)")]
    ExpectedEquals { pos: usize },

    /// A number immediately followed by a letter or digit it cannot absorb
    #[error("bad number syntax: {text:?} at position {pos}")]
    BadNumberSyntax { text: String, pos: usize },

    /// Quoted text without its closing quote
    #[error("unterminated string starting at position {pos}")]
    UnterminatedString { pos: usize },
}

/// Pull-based tokenizer over query text.
///
/// Each call to [`Lexer::next_lexeme`] yields the next lexeme. Whitespace is
/// skipped. Once end of input or an error has been produced the lexer is
/// finished and keeps answering with end of input.
pub struct Lexer {
    source: String,
    /// Characters paired with their byte offset in `source`
    input: Vec<(usize, char)>,
    position: usize,
    finished: bool,
    yielded_terminal: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            source: input.to_string(),
            input: input.char_indices().collect(),
            position: 0,
            finished: false,
            yielded_terminal: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).map(|&(_, ch)| ch)
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).map(|&(_, ch)| ch)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Byte offset of the character at `index`, or the input length past the end.
    fn offset(&self, index: usize) -> usize {
        self.input
            .get(index)
            .map(|&(pos, _)| pos)
            .unwrap_or(self.source.len())
    }

    fn text_from(&self, start: usize) -> &str {
        &self.source[self.offset(start)..self.offset(self.position)]
    }

    fn emit(&self, token: Token, start: usize) -> Lexeme {
        Lexeme::new(token, self.offset(start), self.text_from(start))
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_word(&mut self) {
        while let Some(ch) = self.current_char() {
            if is_word_char(ch) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_field(&mut self, start: usize) -> Lexeme {
        self.advance(); // Consume '.'
        self.skip_word();
        self.emit(Token::Field, start)
    }

    fn read_identifier(&mut self, start: usize) -> Lexeme {
        self.skip_word();

        let token = match self.text_from(start) {
            "where" => Token::Where,
            "and" => Token::And,
            "or" => Token::Or,
            "in" => Token::In,
            "contains" => Token::Contains,
            "true" | "false" => Token::Bool,
            _ => Token::Identifier,
        };
        self.emit(token, start)
    }

    fn read_string(&mut self, start: usize, quote: char, token: Token) -> Result<Lexeme, LexError> {
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(self.emit(token, start));
            }
        }

        Err(LexError::UnterminatedString {
            pos: self.offset(start),
        })
    }

    fn read_number(&mut self, start: usize) -> Result<Lexeme, LexError> {
        if matches!(self.current_char(), Some('+' | '-')) {
            self.advance();
        }
        self.skip_digits();
        if self.current_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        if self.current_char().is_some_and(is_word_char) {
            self.advance();
            return Err(LexError::BadNumberSyntax {
                text: self.text_from(start).to_string(),
                pos: self.offset(start),
            });
        }

        Ok(self.emit(Token::Number, start))
    }

    /// One-character operator, or its two-character form when followed by `=`.
    fn read_operator(&mut self, start: usize, single: Token, with_eq: Token) -> Lexeme {
        self.advance();
        if self.current_char() == Some('=') {
            self.advance();
            self.emit(with_eq, start)
        } else {
            self.emit(single, start)
        }
    }

    fn single(&mut self, token: Token, start: usize) -> Lexeme {
        self.advance();
        self.emit(token, start)
    }

    fn lex(&mut self) -> Result<Lexeme, LexError> {
        self.skip_whitespace();
        let start = self.position;

        match self.current_char() {
            None => Ok(self.emit(Token::Eof, start)),
            Some(',') => Ok(self.single(Token::Comma, start)),
            Some('(') => Ok(self.single(Token::LParen, start)),
            Some(')') => Ok(self.single(Token::RParen, start)),
            Some('[') => Ok(self.single(Token::LBracket, start)),
            Some(']') => Ok(self.single(Token::RBracket, start)),
            Some('.') => Ok(self.read_field(start)),
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(self.emit(Token::EqEq, start))
                } else {
                    Err(LexError::ExpectedEquals {
                        pos: self.offset(start),
                    })
                }
            }
            Some('!') => Ok(self.read_operator(start, Token::Not, Token::NotEq)),
            Some('<') => Ok(self.read_operator(start, Token::Lt, Token::LtEq)),
            Some('>') => Ok(self.read_operator(start, Token::Gt, Token::GtEq)),
            Some('"') => self.read_string(start, '"', Token::String),
            Some('\'') => self.read_string(start, '\'', Token::Char),
            Some(ch) if ch == '+' || ch == '-' || ch.is_ascii_digit() => self.read_number(start),
            Some(ch) if is_word_char(ch) => Ok(self.read_identifier(start)),
            Some(ch) => Err(LexError::MalformedQuery {
                ch,
                pos: self.offset(start),
            }),
        }
    }

    /// Produces the next lexeme.
    ///
    /// The stream always ends with exactly one end-of-input lexeme or one
    /// error; afterwards only end-of-input is returned.
    pub fn next_lexeme(&mut self) -> Result<Lexeme, LexError> {
        if self.finished {
            return Ok(Lexeme::new(Token::Eof, self.source.len(), ""));
        }

        let result = self.lex();
        match &result {
            Ok(lexeme) => {
                trace!(token = %lexeme.token, pos = lexeme.pos, text = %lexeme.text, "lexeme");
                if lexeme.token == Token::Eof {
                    self.finished = true;
                }
            }
            Err(err) => {
                trace!(%err, "lex error");
                self.finished = true;
            }
        }
        result
    }
}

impl Iterator for Lexer {
    type Item = Result<Lexeme, LexError>;

    /// Yields every lexeme up to and including the terminal one, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.yielded_terminal {
            return None;
        }
        let item = self.next_lexeme();
        if self.finished {
            self.yielded_terminal = true;
        }
        Some(item)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("where and or in contains true false");
    assert_eq!(lexer.next_lexeme().unwrap().token, Token::Where);
    assert_eq!(lexer.next_lexeme().unwrap().token, Token::And);
    assert_eq!(lexer.next_lexeme().unwrap().token, Token::Or);
    assert_eq!(lexer.next_lexeme().unwrap().token, Token::In);
    assert_eq!(lexer.next_lexeme().unwrap().token, Token::Contains);
    assert_eq!(lexer.next_lexeme().unwrap().token, Token::Bool);
    assert_eq!(lexer.next_lexeme().unwrap().token, Token::Bool);
    assert_eq!(lexer.next_lexeme().unwrap().token, Token::Eof);
}

#[test]
fn test_where_clause() {
    let mut lexer = Lexer::new(".name where (.id == 1)");
    assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::new(Token::Field, 0, ".name"));
    assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::new(Token::Where, 6, "where"));
    assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::new(Token::LParen, 12, "("));
    assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::new(Token::Field, 13, ".id"));
    assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::new(Token::EqEq, 17, "=="));
    assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::new(Token::Number, 20, "1"));
    assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::new(Token::RParen, 21, ")"));
    assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::new(Token::Eof, 22, ""));
}
