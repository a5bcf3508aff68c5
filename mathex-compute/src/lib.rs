//! Evaluation and rewriting of expression trees produced by [`mathex_parser`].
//!
//! The [`Evaluator`] holds everything needed to turn an [`Expr`] into a number: a table of native
//! functions and aliases, optional dynamic resolvers, rewrite rules, and the numeric
//! configuration. The default evaluator comes with the function library in [`funcs`].
//!
//! ```
//! use mathex_compute::{evaluate, Evaluator, Substitutions};
//! use mathex_compute::primitive::float;
//!
//! assert_eq!(evaluate("1 + 2 * 3").unwrap(), 7);
//!
//! let evaluator = Evaluator::default();
//! let mut substitutions = Substitutions::new();
//! substitutions.insert("x".to_string(), float(3));
//! let value = evaluator.evaluate_str("2x^2", &substitutions).unwrap();
//! assert_eq!(value, 18);
//! ```
//!
//! Expressions can also be rewritten with pattern rules before they are evaluated:
//!
//! ```
//! use mathex_compute::simplify;
//! use mathex_parser::parse;
//!
//! let simplified = simplify(&parse("(x + 0) * 1").unwrap()).unwrap();
//! assert_eq!(simplified.to_string(), "x");
//! ```

pub mod consts;
pub mod funcs;
pub mod numerical;
pub mod primitive;
pub mod symbolic;

pub use mathex_error::{Error, ErrorCategory};
pub use mathex_parser::Expr;
pub use numerical::{
    config::{EvalConfig, NumericMode},
    eval::{evaluate, Evaluator, Substitutions},
    func::{Arity, Body, CallCtxt, Function},
    function_set::FunctionSet,
    resolve::{FunctionOverrider, FunctionResolver, VariableResolver},
    trig_mode::TrigMode,
};
pub use symbolic::{
    rewrite::{RewriteRule, Rewriter},
    simplify::{simplify, simplify_with_steps},
    step::Step,
    step_collector::StepCollector,
    template::{PlaceholderKind, Template},
};
