//! Symbolic manipulation of expression trees.
//!
//! Rewriting works on [`Expr`](mathex_parser::Expr) trees directly. A [`RewriteRule`] is made of
//! three [`Template`]s: a pattern, an optional predicate and a replacement. Templates are
//! expressions that may contain placeholders, written as variables (or calls with no arguments)
//! whose names start with one of these prefixes:
//!
//! | Prefix   | Matches            |
//! | -------- | ------------------ |
//! | `__num`  | a number           |
//! | `__var`  | a variable         |
//! | `__func` | any function call  |
//! | `__exp`  | any expression     |
//!
//! Anything may follow the prefix, so `__exp1` and `__exp_lhs` are two different expression
//! placeholders. A placeholder used more than once in a pattern must match equal subtrees each
//! time, so `__exp - __exp` matches `x * 2 - x * 2`, but not `x - y`.
//!
//! [`simplify()`] rewrites an expression with a set of algebraic identities and folds constant
//! subexpressions:
//!
//! ```
//! use mathex_compute::symbolic::simplify;
//! use mathex_parser::parse;
//!
//! let simplified = simplify(&parse("2 * 3 + x * 1 + 0").unwrap()).unwrap();
//! assert_eq!(simplified.to_string(), "6 + x");
//! ```

pub mod rewrite;
pub mod rules;
pub mod simplify;
pub mod step;
pub mod step_collector;
pub mod template;

pub use rewrite::{RewriteRule, Rewriter};
pub use simplify::{simplify, simplify_with_steps};
pub use step::Step;
pub use step_collector::StepCollector;
pub use template::{Bindings, PlaceholderKind, Template};
