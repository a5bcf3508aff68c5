pub mod ast;
pub mod error;
pub mod fmt;
pub mod resolve;
pub mod term;

use crate::catalog::{OperatorCatalog, DEFAULT_CATALOG};
use ast::Expr;
use error::Error;
use resolve::Resolver;
use term::{Term, TermBuilder};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that change how source code is grouped into an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParserConfig {
    /// If true, two operands written next to each other are multiplied, so `2x` is
    /// `multiply(2, x)`. Otherwise, this is a syntax error.
    pub implicit_multiplication: bool,

    /// If true, implicit multiplication binds tighter than explicit multiplication and division,
    /// so `1/2x` is `1/(2x)`. Otherwise it binds exactly like `*`, so `1/2x` is `(1/2)x`.
    pub high_precedence_implicit_multiplication: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            implicit_multiplication: true,
            high_precedence_implicit_multiplication: true,
        }
    }
}

/// A parser for mathematical expressions, using the operators of an [`OperatorCatalog`].
///
/// The parser only borrows the catalog, so the catalog cannot change while the parser exists.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'c> {
    catalog: &'c OperatorCatalog,
    config: ParserConfig,
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(&DEFAULT_CATALOG, ParserConfig::default())
    }
}

impl<'c> Parser<'c> {
    /// Creates a parser with the given catalog and options.
    pub fn new(catalog: &'c OperatorCatalog, config: ParserConfig) -> Self {
        Self { catalog, config }
    }

    /// Returns the catalog used by this parser.
    pub fn catalog(&self) -> &'c OperatorCatalog {
        self.catalog
    }

    /// Returns the options used by this parser.
    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Returns the raw term tree of the source, before operator precedence is applied.
    pub fn terms(&self, source: &str) -> Result<Vec<Term>, Error> {
        TermBuilder::new(source, self.catalog, self.config).build()
    }

    /// Parses the source into an expression tree.
    pub fn parse(&self, source: &str) -> Result<Expr, Error> {
        let terms = self.terms(source)?;
        Resolver::new(self.catalog, self.config).resolve(terms)
    }
}

/// Parses the source with the default catalog and options.
pub fn parse(source: &str) -> Result<Expr, Error> {
    Parser::default().parse(source)
}
