//! The expression tree produced by the parser.

use rug::Float;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The precision, in bits, that number literals are read with.
pub const PRECISION: u32 = 1 << 9;

/// A node of the expression tree.
///
/// Operators do not have their own node: `1 + x` is `add(1, x)`, and `-x` is `negate(x)`.
/// Parentheses only affect the shape of the tree, so `(x)` is just `x`. Equality is structural.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number, such as `2.5`.
    Number(Float),

    /// A variable, such as `x`.
    Variable(String),

    /// A function call, such as `max(1, 2)`, or an operator applied to its operands.
    Function {
        /// The name of the function.
        name: String,

        /// The arguments, in order.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Creates a number node from an [`f64`].
    pub fn number(value: f64) -> Self {
        Expr::Number(Float::with_val(PRECISION, value))
    }

    /// Creates a variable node.
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// Creates a function node.
    pub fn function(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Returns the value if this is a number node.
    pub fn as_number(&self) -> Option<&Float> {
        match self {
            Expr::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the name if this is a variable node.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Expr::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the name and arguments if this is a function node.
    pub fn as_function(&self) -> Option<(&str, &[Expr])> {
        match self {
            Expr::Function { name, args } => Some((name, args)),
            _ => None,
        }
    }

    /// Returns true if this is a function node named `name`, compared case-insensitively.
    pub fn is_call_to(&self, name: &str) -> bool {
        self.as_function()
            .map_or(false, |(function, _)| function.eq_ignore_ascii_case(name))
    }

    /// Returns the direct children of this node.
    pub fn children(&self) -> &[Expr] {
        match self {
            Expr::Function { args, .. } => args,
            _ => &[],
        }
    }

    /// Calls `f` on this node and every node below it, parents before children.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Returns the names of every variable in the expression.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut variables = BTreeSet::new();
        self.walk(&mut |expr| {
            if let Expr::Variable(name) = expr {
                variables.insert(name.as_str());
            }
        });
        variables
    }

    /// Returns true if the expression contains the variable `name`.
    pub fn contains_variable(&self, name: &str) -> bool {
        self.variables().contains(name)
    }

    /// Returns true if the expression is made only of number nodes and function nodes.
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Number(_) => true,
            Expr::Variable(_) => false,
            Expr::Function { args, .. } => args.iter().all(Expr::is_constant),
        }
    }

    /// Returns the number of nodes in the expression.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Expr::node_count).sum::<usize>()
    }
}

impl std::str::FromStr for Expr {
    type Err = mathex_error::Error;

    /// Parses an expression with the default catalog and configuration.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        super::parse(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn structural_equality() {
        let a = Expr::function("add", [Expr::number(1.0), Expr::variable("x")]);
        let b = Expr::function("add", [Expr::number(1.0), Expr::variable("x")]);
        let c = Expr::function("add", [Expr::variable("x"), Expr::number(1.0)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(Expr::number(2.0), Expr::Number(Float::with_val(53, 2)));
    }

    #[test]
    fn traversal() {
        let expr: Expr = "sin(x) * y + x ^ 2".parse().unwrap();
        assert_eq!(expr.variables().into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(expr.contains_variable("y"));
        assert!(!expr.contains_variable("z"));
        assert!(!expr.is_constant());
        assert_eq!(expr.node_count(), 8);

        let mut names = Vec::new();
        expr.walk(&mut |node| {
            if let Some((name, _)) = node.as_function() {
                names.push(name);
            }
        });
        assert_eq!(names, vec!["add", "multiply", "sin", "pow"]);
    }

    #[test]
    fn call_names_are_case_insensitive() {
        let expr = Expr::function("SIN", [Expr::variable("x")]);
        assert!(expr.is_call_to("sin"));
        assert!(!Expr::variable("sin").is_call_to("sin"));
    }
}
