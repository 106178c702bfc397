use std::{cmp::Ordering, fmt};

/// Relational operators usable in an operation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Not (`!`)
    ///
    /// Accepted by the parser but never satisfied.
    Not,
}

impl RelOp {
    /// Whether an ordering between left and right operands satisfies this operator.
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            RelOp::LessThan => ordering == Ordering::Less,
            RelOp::LessEqual => ordering != Ordering::Greater,
            RelOp::GreaterThan => ordering == Ordering::Greater,
            RelOp::GreaterEqual => ordering != Ordering::Less,
            RelOp::Equal => ordering == Ordering::Equal,
            RelOp::NotEqual => ordering != Ordering::Equal,
            RelOp::Not => false,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            RelOp::LessThan => "<",
            RelOp::LessEqual => "<=",
            RelOp::GreaterThan => ">",
            RelOp::GreaterEqual => ">=",
            RelOp::Equal => "==",
            RelOp::NotEqual => "!=",
            RelOp::Not => "!",
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
