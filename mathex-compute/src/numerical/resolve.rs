//! Hooks that let the host application supply variables and functions on demand.
//!
//! Each trait is implemented for closures with the matching signature, so most hosts can pass a
//! closure directly:
//!
//! ```
//! use mathex_compute::{Evaluator, Substitutions};
//! use mathex_compute::primitive::float;
//!
//! let mut evaluator = Evaluator::default();
//! evaluator.set_variable_resolver(|name: &str| (name == "answer").then(|| float(42)));
//! assert_eq!(evaluator.evaluate_str("answer + 1", &Substitutions::new()).unwrap(), 43);
//! ```

use mathex_error::Error;
use mathex_parser::Expr;
use rug::Float;
use super::func::{CallCtxt, Function};

/// Supplies values for variables that are missing from the substitutions.
pub trait VariableResolver: Send + Sync {
    /// Returns the value of the variable, or [`None`] if it is unknown.
    fn resolve_variable(&self, name: &str) -> Option<Float>;
}

impl<F> VariableResolver for F
where
    F: Fn(&str) -> Option<Float> + Send + Sync,
{
    fn resolve_variable(&self, name: &str) -> Option<Float> {
        self(name)
    }
}

/// Supplies functions that are missing from the function table.
pub trait FunctionResolver: Send + Sync {
    /// Returns the function to call, or [`None`] if it is unknown.
    fn resolve_function(&self, name: &str) -> Option<Function>;
}

impl<F> FunctionResolver for F
where
    F: Fn(&str) -> Option<Function> + Send + Sync,
{
    fn resolve_function(&self, name: &str) -> Option<Function> {
        self(name)
    }
}

/// Intercepts every function call before the function table is consulted.
pub trait FunctionOverrider: Send + Sync {
    /// Returns the value of the call, or [`None`] to let the call proceed normally.
    ///
    /// The arguments are not evaluated; use [`CallCtxt::eval`] to evaluate them.
    fn override_function(
        &self,
        name: &str,
        args: &[Expr],
        ctxt: &CallCtxt<'_>,
    ) -> Result<Option<Float>, Error>;
}

impl<F> FunctionOverrider for F
where
    F: Fn(&str, &[Expr], &CallCtxt<'_>) -> Result<Option<Float>, Error> + Send + Sync,
{
    fn override_function(
        &self,
        name: &str,
        args: &[Expr],
        ctxt: &CallCtxt<'_>,
    ) -> Result<Option<Float>, Error> {
        self(name, args, ctxt)
    }
}
