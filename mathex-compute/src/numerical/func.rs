use mathex_error::Error;
use mathex_parser::Expr;
use rug::Float;
use std::{fmt, sync::Arc};
use super::{eval::{Evaluator, Substitutions}, trig_mode::TrigMode};

/// The number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),

    /// This many arguments or more.
    AtLeast(usize),

    /// Between the two bounds, inclusive.
    Between(usize, usize),
}

impl Arity {
    /// Any number of arguments, including none.
    pub const ANY: Arity = Arity::AtLeast(0);

    /// Returns true if a call with `count` arguments is allowed.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Between(lo, hi) => (lo..=hi).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match *self {
            Arity::Exact(n) => write!(f, "exactly {} argument{}", n, plural(n)),
            Arity::AtLeast(0) => write!(f, "any number of arguments"),
            Arity::AtLeast(n) => write!(f, "at least {} argument{}", n, plural(n)),
            Arity::Between(lo, hi) => write!(f, "between {} and {} arguments", lo, hi),
        }
    }
}

/// The signature of a function that receives evaluated arguments.
pub type EagerFn = dyn Fn(&[Float], &CallCtxt<'_>) -> Result<Float, Error> + Send + Sync;

/// The signature of a function that receives its argument expressions unevaluated.
pub type LazyFn = dyn Fn(&[Expr], &CallCtxt<'_>) -> Result<Float, Error> + Send + Sync;

/// The implementation of a [`Function`].
#[derive(Clone)]
pub enum Body {
    /// Receives the values of the arguments, evaluated left to right.
    Eager(Arc<EagerFn>),

    /// Receives the argument expressions, and decides itself which to evaluate, if any.
    Lazy(Arc<LazyFn>),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Eager(_) => f.write_str("Eager"),
            Body::Lazy(_) => f.write_str("Lazy"),
        }
    }
}

/// A native function that can be registered on an [`Evaluator`].
#[derive(Debug, Clone)]
pub struct Function {
    /// The canonical name of the function. Names are case-insensitive.
    pub name: String,

    /// The number of arguments the function accepts. This is checked before the function is
    /// called.
    pub arity: Arity,

    /// The implementation.
    pub body: Body,

    /// If true, the function may be replaced by its value when all of its arguments are numbers.
    pub pure: bool,
}

impl Function {
    /// Creates a pure function that receives evaluated arguments.
    pub fn new<F>(name: &str, arity: Arity, body: F) -> Self
    where
        F: Fn(&[Float], &CallCtxt<'_>) -> Result<Float, Error> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            arity,
            body: Body::Eager(Arc::new(body)),
            pure: true,
        }
    }

    /// Creates a pure function that receives its argument expressions unevaluated.
    pub fn lazy<F>(name: &str, arity: Arity, body: F) -> Self
    where
        F: Fn(&[Expr], &CallCtxt<'_>) -> Result<Float, Error> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            arity,
            body: Body::Lazy(Arc::new(body)),
            pure: true,
        }
    }

    /// Creates a function with no arguments that returns a constant, computed at the precision of
    /// the evaluator.
    pub fn constant<F>(name: &str, value: F) -> Self
    where
        F: Fn(u32) -> Float + Send + Sync + 'static,
    {
        Self::new(name, Arity::Exact(0), move |_, ctxt| Ok(value(ctxt.precision())))
    }

    /// Marks the function as impure, so that it is never replaced by its value during
    /// simplification.
    pub fn impure(mut self) -> Self {
        self.pure = false;
        self
    }
}

/// The state available to a function while it is being called.
pub struct CallCtxt<'a> {
    pub(crate) evaluator: &'a Evaluator,
    pub(crate) substitutions: &'a Substitutions,

    /// The name the function was called with.
    pub(crate) name: &'a str,
}

impl<'a> CallCtxt<'a> {
    /// Returns the evaluator the function was called from.
    pub fn evaluator(&self) -> &'a Evaluator {
        self.evaluator
    }

    /// Returns the substitutions of the current evaluation.
    pub fn substitutions(&self) -> &'a Substitutions {
        self.substitutions
    }

    /// Returns the name the function was called with, which may be an alias.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the number of significand bits values should be computed with.
    pub fn precision(&self) -> u32 {
        self.evaluator.config().mode.precision()
    }

    /// Returns the angle unit of trigonometric functions.
    pub fn trig_mode(&self) -> TrigMode {
        self.evaluator.config().trig_mode
    }

    /// Evaluates an expression with the current substitutions.
    pub fn eval(&self, expr: &Expr) -> Result<Float, Error> {
        self.evaluator.evaluate_tree(expr, self.substitutions)
    }

    /// Creates a [`Float`] at the current precision.
    pub fn float<T>(&self, value: T) -> Float
    where
        Float: rug::Assign<T>,
    {
        Float::with_val(self.precision(), value)
    }
}
