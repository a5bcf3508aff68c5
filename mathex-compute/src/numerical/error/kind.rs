use ariadne::Fmt;
use mathex_attrs::ErrorKind;
use mathex_error::EXPR;
use crate::numerical::func::Arity;

/// The variable has no value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = UnknownVariable,
    message = format!("`{}` is not defined", name),
    help = format!("pass a value for {} in the substitutions", name.fg(EXPR)),
)]
pub struct UnknownVariable {
    /// The name of the variable.
    pub name: String,
}

/// The function does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = UnknownFunction,
    message = format!("the `{}` function does not exist", name),
    help = if suggestions.is_empty() {
        "register it on the evaluator, or install a function resolver".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// A function was called with a number of arguments it does not accept.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidArgumentCount,
    message = format!("wrong number of arguments for the `{}` function", name),
    help = format!(
        "the `{}` function takes {}; there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given,
    ),
)]
pub struct InvalidArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The arity of the function.
    pub expected: Arity,

    /// The number of arguments that were given.
    pub given: usize,
}

/// Attempted to divide by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = format!("division by zero in the `{}` function", name),
)]
pub struct DivisionByZero {
    /// The name of the function.
    pub name: String,
}

/// A function was given an argument outside of its domain, such as `sqrt(-1)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = format!("the `{}` function is undefined for {}", name, reason),
)]
pub struct OutOfDomain {
    /// The name of the function.
    pub name: String,

    /// What was wrong with the arguments.
    pub reason: String,
}

/// A function that only works on integers was given a number with a fractional part.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Domain,
    message = format!("the `{}` function requires integer arguments", name),
    help = format!("round the arguments first, for example with {}", "round(x)".fg(EXPR)),
)]
pub struct NonIntegerArgument {
    /// The name of the function.
    pub name: String,
}

/// Rewriting did not reach a fixpoint.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = NonTerminatingRewrite,
    message = format!("rewriting did not terminate after {} passes", iterations),
    help = "check for rules that undo each other, such as `a * b => b * a`",
)]
pub struct NonTerminatingRewrite {
    /// The number of passes that were made.
    pub iterations: usize,
}

/// A function with this name, or an alias with this name, already exists.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("the name `{}` is already in use", name))]
pub struct FunctionAlreadyExists {
    /// The name that was registered.
    pub name: String,
}

/// A function, or an alias, with this name does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("there is no function or alias named `{}`", name))]
pub struct FunctionDoesNotExist {
    /// The name that was looked up.
    pub name: String,
}

/// A rewrite placeholder was written as a call with arguments, such as `__exp1(2)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = format!("the placeholder `{}` cannot take arguments", name),
)]
pub struct PlaceholderWithArguments {
    /// The name of the placeholder.
    pub name: String,
}

/// A placeholder appears in a rule's predicate or replacement, but not in its pattern.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = format!("the placeholder `{}` is not bound by the pattern", name),
)]
pub struct UnboundPlaceholder {
    /// The name of the placeholder.
    pub name: String,
}
