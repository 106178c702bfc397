//! CLI support for fieldq
//!
//! The binary is a thin shell over these functions, so they can also be
//! driven directly from other tools and from tests.

mod check;
mod docs;
mod inspect;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::get_syntax_reference;
pub use inspect::{execute_ast, execute_paths};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Query error: {0}")]
    Engine(#[from] crate::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}

/// Decode the JSON document given on the command line or stdin.
fn decode_input(input: Option<&str>) -> Result<crate::Value, CliError> {
    let text = input.ok_or(CliError::NoInput)?;
    Ok(crate::Value::from_json_str(text)?)
}
