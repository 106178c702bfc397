//! # fieldq - Abstract Syntax Tree
//!
//! Types shared by the lexer, the parser and the evaluator.
//!
//! - **[tokens]** - Lexeme kinds produced by the lexer
//! - **[operators]** - Relational operators
//! - **[nodes]** - Tree nodes produced by the parser
//!
//! ## Query shape
//!
//! ```text
//! .name, .data.id where ((.data.id == 1) or (.name != "foobar"))
//! ```
//!
//! parses to
//!
//! ```text
//! Sequence
//!  Chain(.name)
//!  Chain(.data.id)
//!  Where
//!   Or
//!    Operation(==)
//!     Chain(.data.id)
//!     Integer(1)
//!    Operation(!=)
//!     Chain(.name)
//!     Text("foobar")
//! ```
//!
//! ## Conditions
//!
//! Conditions have no precedence table. Operators are folded into the tree in
//! the order they appear: each new operator takes everything built so far as
//! its left operand. Parentheses are the only grouping, so every
//! sub-condition that must stay intact has to be parenthesized.
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use nodes::{Node, Number, print_tree};
pub use operators::RelOp;
pub use tokens::{Lexeme, Token};
