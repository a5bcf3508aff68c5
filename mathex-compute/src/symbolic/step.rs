use mathex_parser::Expr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single rule application made while rewriting an expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// The rule that was applied, written as `pattern => replacement`.
    pub rule: String,

    /// The subtree the rule matched.
    pub before: Expr,

    /// The subtree it was replaced with.
    pub after: Expr,
}
