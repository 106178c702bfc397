//! Execute fieldq queries against JSON input

use super::{CliError, decode_input};
use crate::{Engine, EngineOptions, MergeStrategy, Value, parser};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to execute
    pub query: String,
    /// JSON input string
    pub input: Option<String>,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
    /// How multiple selected fields are merged
    pub merge: MergeStrategy,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query executed and selected a value
    Success(Value),
    /// Query executed but the where condition did not hold
    Filtered,
}

/// Execute a fieldq check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        parser::parse(&options.query)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let document = decode_input(options.input.as_deref())?;

    let engine = Engine::new(EngineOptions {
        merge: options.merge,
    });
    let result = match engine.run(&options.query, &document)? {
        Some(value) => CheckResult::Success(value),
        None => CheckResult::Filtered,
    };
    Ok(result)
}
