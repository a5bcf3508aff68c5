//! Lexer, operator catalog and two-phase parser for mathematical expressions.
//!
//! Parsing happens in two steps. The [`TermBuilder`](parser::term::TermBuilder) groups the
//! token stream into flat, precedence-agnostic sequences of operands and operators, one per
//! level of parentheses or function argument. The [`Resolver`](parser::resolve::Resolver) then
//! folds each sequence into a tree using the precedence and associativity recorded in the
//! [`OperatorCatalog`].
//!
//! ```
//! use mathex_parser::{parse, Expr};
//!
//! let expr = parse("1 + 2x").unwrap();
//! assert_eq!(expr, Expr::function("add", [
//!     Expr::number(1.0),
//!     Expr::function("multiply", [Expr::number(2.0), Expr::variable("x")]),
//! ]));
//! assert_eq!(expr.to_string(), "1 + 2 * x");
//! ```

pub mod catalog;
pub mod parser;
pub mod tokenizer;

pub use catalog::{
    AssociativityOptions,
    CatalogOptions,
    ModuloPrecedence,
    OperatorCatalog,
    Relation,
    DEFAULT_CATALOG,
};
pub use catalog::op::{Arity, Associativity, Operator, OperatorId, Position};
pub use mathex_error::{Error, ErrorCategory};
pub use parser::{ast::{Expr, PRECISION}, fmt::Latex, parse, Parser, ParserConfig};
