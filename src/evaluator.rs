use std::{cmp::Ordering, collections::HashMap, slice};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{Node, Number, RelOp},
    document::{Document, Subtree},
    value::Value,
};

/// Errors that can occur during query evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A selected field path is not present in the document
    #[error("some requested fields do not exist: {path}")]
    NonExistingFields { path: String },
}

/// How several selected fields are combined into one result object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MergeStrategy {
    /// Every selection rebuilds its intermediate objects, replacing any
    /// object an earlier selection placed under the same key.
    ///
    /// `.data.id, .data.name` yields `{"data": {"name": ...}}`.
    #[default]
    Overwrite,

    /// Intermediate objects are shared between selections.
    ///
    /// `.data.id, .data.name` yields `{"data": {"id": ..., "name": ...}}`.
    Deep,
}

/// Result of evaluating a query against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The condition held (or there was none) and these are the selected fields
    Selected(Value),
    /// The `where` condition did not hold
    Filtered,
}

impl Outcome {
    pub fn into_option(self) -> Option<Value> {
        match self {
            Outcome::Selected(value) => Some(value),
            Outcome::Filtered => None,
        }
    }
}

/// Walks a parsed query against a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    merge: MergeStrategy,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_merge(merge: MergeStrategy) -> Self {
        Evaluator { merge }
    }

    /// Evaluates a parsed query against a document.
    ///
    /// 1. every selector before the `where` clause must exist in the document;
    /// 2. the `where` condition, if any, must hold;
    /// 3. the selected fields are projected into the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldq::{Document, Evaluator, Outcome, Value, parser};
    /// use std::collections::HashMap;
    ///
    /// let mut doc = HashMap::new();
    /// doc.insert("id".to_string(), Value::Integer(1));
    /// let doc = Document::build(&Value::Object(doc)).unwrap();
    ///
    /// let query = parser::parse(".id where (.id == 1)").unwrap();
    /// let outcome = Evaluator::new().run(&query, &doc).unwrap();
    /// assert_eq!(outcome, Outcome::Selected(Value::Integer(1)));
    /// ```
    pub fn run(&self, root: &Node, doc: &Document) -> Result<Outcome, EvalError> {
        let nodes = match root {
            Node::Sequence(nodes) => nodes.as_slice(),
            other => slice::from_ref(other),
        };

        let selectors: Vec<&str> = nodes
            .iter()
            .map_while(|node| match node {
                Node::Chain(chain) => Some(chain.as_str()),
                _ => None,
            })
            .collect();

        self.check_fields(&selectors, doc)?;

        if !self.evaluate_where(nodes, doc) {
            debug!("where condition not satisfied");
            return Ok(Outcome::Filtered);
        }

        Ok(Outcome::Selected(self.project(&selectors, doc)))
    }

    fn check_fields(&self, selectors: &[&str], doc: &Document) -> Result<(), EvalError> {
        match selectors.iter().find(|path| !doc.has_path(path)) {
            Some(path) => {
                debug!(path, "requested field does not exist");
                Err(EvalError::NonExistingFields {
                    path: path.to_string(),
                })
            }
            None => Ok(()),
        }
    }

    fn evaluate_where(&self, nodes: &[Node], doc: &Document) -> bool {
        let condition = nodes.iter().find_map(|node| match node {
            Node::Where(condition) => Some(condition),
            _ => None,
        });

        // No where clause: nothing to filter on
        match condition {
            Some(condition) => self.evaluate_condition(condition, doc),
            None => true,
        }
    }

    fn evaluate_condition(&self, condition: &Node, doc: &Document) -> bool {
        let result = match condition {
            Node::And { left, right } => {
                self.evaluate_condition(left, doc) && self.evaluate_condition(right, doc)
            }
            Node::Or { left, right } => {
                self.evaluate_condition(left, doc) || self.evaluate_condition(right, doc)
            }
            // Each element is evaluated as a condition of its own; plain
            // literals are not conditions, so they never match.
            Node::In { right, .. } => match right.as_ref() {
                Node::Sequence(elements) => elements
                    .iter()
                    .any(|element| self.evaluate_condition(element, doc)),
                _ => false,
            },
            // Parsed, never matches
            Node::Contains { .. } => false,
            Node::Operation { op, left, right } => self.evaluate_operation(*op, left, right, doc),
            _ => false,
        };
        trace!(?condition, result, "condition evaluated");
        result
    }

    fn evaluate_operation(&self, op: RelOp, left: &Node, right: &Node, doc: &Document) -> bool {
        let Node::Chain(chain) = left else {
            return false;
        };

        // Fields referenced only in the condition are not checked up front;
        // a missing one simply fails the comparison.
        let (Some(left), Some(right)) = (doc.get(chain), operand_value(right, doc)) else {
            return false;
        };

        compare(&left, &right).is_some_and(|ordering| op.accepts(ordering))
    }

    fn project(&self, selectors: &[&str], doc: &Document) -> Value {
        let subtrees: Vec<Subtree<'_>> = selectors
            .iter()
            .filter_map(|path| doc.find_subtree(path))
            .collect();

        if let [single] = subtrees.as_slice() {
            return single.value();
        }

        let mut result = HashMap::new();
        for subtree in subtrees {
            let segments: Vec<&str> = subtree.segments().collect();
            place(&mut result, &segments, subtree.value(), self.merge);
        }
        Value::Object(result)
    }
}

/// Value of a comparison's right-hand side.
fn operand_value(node: &Node, doc: &Document) -> Option<Value> {
    match node {
        Node::Chain(chain) => doc.get(chain),
        Node::Bool(b) => Some(Value::Boolean(*b)),
        Node::Text(text) => Some(Value::String(char_literal_text(text).to_string())),
        Node::Number(Number::Integer(n)) => Some(Value::Integer(*n)),
        Node::Number(Number::Float(n)) => Some(Value::Float(*n)),
        _ => None,
    }
}

/// Order two values, driven by the type of the left one.
///
/// - integer left: a float right is truncated to an integer
/// - float left: an integer right is promoted to a float
/// - string left: the right string loses one layer of surrounding `"`
///
/// Any other pairing is incomparable.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Float(b)) => Some(a.cmp(&(*b as i64))),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(unquote(b))),
        _ => None,
    }
}

/// Strip one leading and one trailing `"`.
fn unquote(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// Contents of a single-quoted character literal; any other text is returned as is.
fn char_literal_text(text: &str) -> &str {
    text.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(text)
}

/// Put `data` at the position named by `segments`, creating intermediate objects.
fn place(map: &mut HashMap<String, Value>, segments: &[&str], data: Value, merge: MergeStrategy) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.to_string(), data);
        }
        [head, rest @ ..] => {
            let slot = map.entry(head.to_string()).or_insert(Value::Null);
            if merge == MergeStrategy::Overwrite || !matches!(slot, Value::Object(_)) {
                *slot = Value::Object(HashMap::new());
            }
            if let Value::Object(child) = slot {
                place(child, rest, data, merge);
            }
        }
    }
}
