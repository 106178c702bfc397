//! Show the parsed form of a query and the paths of a document.

use super::{CliError, decode_input};
use crate::{Document, ast::print_tree, parser};

/// Parse `query` and render its tree, one node per line.
pub fn execute_ast(query: &str) -> Result<String, CliError> {
    let root = parser::parse(query)?;
    Ok(print_tree(&root))
}

/// Every path of the decoded document, sorted, root first.
pub fn execute_paths(input: Option<&str>) -> Result<Vec<String>, CliError> {
    let value = decode_input(input)?;
    let doc = Document::build(&value).ok_or(crate::Error::InvalidObject)?;
    Ok(doc.paths().into_iter().map(str::to_string).collect())
}
