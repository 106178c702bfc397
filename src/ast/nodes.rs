use std::fmt::Write;

use crate::ast::RelOp;

/// Numeric literal, either integer or floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// Abstract Syntax Tree node produced by the parser.
///
/// A parsed query is always a [`Node::Sequence`] holding the field selectors
/// followed by at most one [`Node::Where`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Ordered list of nodes
    ///
    /// Top-level container of a query, and the right-hand side of `in`/`contains`.
    ///
    /// # Example
    /// ```text
    /// .name, .id
    /// [1, 2, 3]
    /// ```
    Sequence(Vec<Node>),

    /// Dotted field path, or `.` for the whole document
    ///
    /// # Example
    /// ```text
    /// .data.id
    /// ```
    Chain(String),

    /// Boolean literal
    Bool(bool),

    /// Text literal, surrounding quotes retained
    ///
    /// # Example
    /// ```text
    /// "Vincent"
    /// ```
    Text(String),

    /// Number literal
    Number(Number),

    /// `where` clause wrapping exactly one condition
    Where(Box<Node>),

    /// Logical AND (`and`)
    And { left: Box<Node>, right: Box<Node> },

    /// Logical OR (`or`)
    Or { left: Box<Node>, right: Box<Node> },

    /// Membership test (`in`)
    In { left: Box<Node>, right: Box<Node> },

    /// Containment test (`contains`)
    Contains { left: Box<Node>, right: Box<Node> },

    /// Relational comparison
    ///
    /// # Example
    /// ```text
    /// .data.id == 1
    /// ```
    Operation {
        op: RelOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// True for the node kinds a `where` clause accepts as its condition.
    pub fn is_condition(&self) -> bool {
        matches!(
            self,
            Node::And { .. }
                | Node::Or { .. }
                | Node::In { .. }
                | Node::Contains { .. }
                | Node::Operation { .. }
        )
    }

    fn label(&self) -> String {
        match self {
            Node::Sequence(_) => "Sequence".to_string(),
            Node::Chain(chain) => format!("Chain({})", chain),
            Node::Bool(b) => format!("Bool({})", b),
            Node::Text(text) => format!("Text({})", text),
            Node::Number(Number::Integer(n)) => format!("Integer({})", n),
            Node::Number(Number::Float(n)) => format!("Float({})", n),
            Node::Where(_) => "Where".to_string(),
            Node::And { .. } => "And".to_string(),
            Node::Or { .. } => "Or".to_string(),
            Node::In { .. } => "In".to_string(),
            Node::Contains { .. } => "Contains".to_string(),
            Node::Operation { op, .. } => format!("Operation({})", op),
        }
    }

    fn children(&self) -> Vec<&Node> {
        match self {
            Node::Sequence(nodes) => nodes.iter().collect(),
            Node::Where(condition) => vec![&**condition],
            Node::And { left, right }
            | Node::Or { left, right }
            | Node::In { left, right }
            | Node::Contains { left, right }
            | Node::Operation { left, right, .. } => vec![&**left, &**right],
            _ => Vec::new(),
        }
    }
}

/// Renders a tree one node per line, children indented by one space per level.
///
/// # Examples
///
/// ```
/// use fieldq::ast::{Node, print_tree};
///
/// let root = Node::Sequence(vec![Node::Chain(".name".to_string())]);
/// assert_eq!(print_tree(&root), "Sequence\n Chain(.name)\n");
/// ```
pub fn print_tree(root: &Node) -> String {
    let mut out = String::new();
    print_indent(&mut out, root, 0);
    out
}

fn print_indent(out: &mut String, node: &Node, indent: usize) {
    let _ = writeln!(out, "{}{}", " ".repeat(indent), node.label());
    for child in node.children() {
        print_indent(out, child, indent + 1);
    }
}
