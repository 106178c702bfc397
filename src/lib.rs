pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod document;
pub mod engine;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{Lexeme, Node, Number, RelOp, Token};
pub use document::{Document, Subtree};
pub use engine::{Engine, EngineOptions, Error, run};
pub use evaluator::{EvalError, Evaluator, MergeStrategy, Outcome};
pub use lexer::{LexError, Lexer};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use value::Value;
