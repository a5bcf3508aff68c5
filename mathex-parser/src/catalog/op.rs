//! Operator definitions stored in the [`OperatorCatalog`](super::OperatorCatalog).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Arity {
    Unary,
    Binary,
}

/// The associativity of an operator.
///
/// For binary operators, this decides how a chain of operators with the same precedence is
/// grouped. For unary operators, it decides which side the operand is on: a left-associative
/// unary operator is written after its operand (`5!`), a right-associative one before it (`-5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Associativity {
    Left,
    Right,
}

/// Where an operator is written relative to its operand(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Before its single operand, such as `-x`.
    Prefix,

    /// After its single operand, such as `x!`.
    Postfix,

    /// Between its two operands, such as `x + y`.
    Infix,
}

/// Index of an operator within the catalog that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorId(pub(crate) usize);

/// The definition of an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operator {
    /// The name of the function the operator is turned into, such as `add`.
    pub function: String,

    /// The spellings of the operator in source code.
    pub tokens: Vec<String>,

    /// The number of operands.
    pub arity: Arity,

    /// The associativity of the operator.
    pub associativity: Associativity,

    /// The precedence band of the operator. Higher values bind tighter. The catalog assigns this
    /// when the operator is inserted.
    pub(crate) precedence: u32,
}

impl Operator {
    /// Creates a new operator definition. The precedence is assigned by the catalog.
    pub fn new<I, S>(function: &str, arity: Arity, associativity: Associativity, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.to_string(),
            tokens: tokens.into_iter()
                .map(Into::into)
                .filter(|token: &String| !token.is_empty())
                .collect(),
            arity,
            associativity,
            precedence: 0,
        }
    }

    /// Creates a binary operator.
    pub fn binary<I, S>(function: &str, associativity: Associativity, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(function, Arity::Binary, associativity, tokens)
    }

    /// Creates a unary operator written before its operand.
    pub fn prefix<I, S>(function: &str, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(function, Arity::Unary, Associativity::Right, tokens)
    }

    /// Creates a unary operator written after its operand.
    pub fn postfix<I, S>(function: &str, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(function, Arity::Unary, Associativity::Left, tokens)
    }

    /// Returns the precedence band of the operator.
    pub fn precedence(&self) -> u32 {
        self.precedence
    }

    /// Returns where the operator is written relative to its operands.
    pub fn position(&self) -> Position {
        match (self.arity, self.associativity) {
            (Arity::Binary, _) => Position::Infix,
            (Arity::Unary, Associativity::Left) => Position::Postfix,
            (Arity::Unary, Associativity::Right) => Position::Prefix,
        }
    }

    /// Returns true if the given spelling is one of this operator's tokens.
    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// The spelling used when printing the operator.
    pub fn primary_token(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }
}
