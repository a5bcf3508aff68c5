use ariadne::Fmt;
use mathex_attrs::ErrorKind;
use mathex_error::EXPR;

/// A character that does not start any token.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Lex,
    message = format!("unrecognized character `{}`", character),
    labels = ["this character"],
    help = "only numbers, names, parentheses, commas and operators can appear in an expression",
)]
pub struct UnrecognizedCharacter {
    /// The character that was found.
    pub character: char,
}

/// A number literal that could not be read, such as `1.2.3`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Lex,
    message = format!("malformed number `{}`", literal),
    labels = ["this number"],
    help = "a number can contain at most one decimal point",
)]
pub struct MalformedNumber {
    /// The text of the literal.
    pub literal: String,
}

/// A quoted variable name that was never closed, such as `"x`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Lex,
    message = "unterminated quoted variable",
    labels = ["this quote is never closed"],
    help = "add a matching quote at the end of the name",
)]
pub struct UnterminatedQuote;

/// A quoted variable with nothing between its quotes.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Lex,
    message = "empty variable name",
    labels = ["this name is empty"],
)]
pub struct EmptyVariableName;

/// The source code did not contain an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "empty expression",
    labels = [format!("expected an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyExpression;

/// An opening parenthesis was never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "unclosed parenthesis",
    labels = ["this parenthesis is never closed"],
    help = format!("add a {} at the end of the group", "`)`".fg(EXPR)),
)]
pub struct UnclosedParenthesis;

/// A closing parenthesis without a matching opening parenthesis.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "unmatched closing parenthesis",
    labels = ["this parenthesis"],
    help = format!("remove it, or add a {} before it", "`(`".fg(EXPR)),
)]
pub struct UnmatchedCloseParenthesis;

/// A pair of parentheses with nothing inside, outside of a function call.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "empty parentheses",
    labels = [format!("expected an {} inside", "expression".fg(EXPR))],
)]
pub struct EmptyGroup;

/// A function argument with nothing in it, such as the second argument in `f(1,,2)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "empty function argument",
    labels = [format!("expected an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyArgument;

/// A comma outside of a function's argument list.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "unexpected comma",
    labels = ["this comma"],
    help = "commas can only separate the arguments of a function call",
)]
pub struct UnexpectedComma;

/// An operator that needs an operand on its left, but has none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = format!("missing left operand for `{}`", operator),
    labels = [format!("add an {} before this operator", "expression".fg(EXPR))],
)]
pub struct MissingLeftOperand {
    /// The spelling of the operator.
    pub operator: String,
}

/// An operator that needs an operand on its right, but has none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = format!("missing right operand for `{}`", operator),
    labels = [format!("add an {} after this operator", "expression".fg(EXPR))],
)]
pub struct MissingRightOperand {
    /// The spelling of the operator.
    pub operator: String,
}

/// Two operands next to each other with no operator between them, while implicit
/// multiplication is disabled.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Syntax,
    message = "missing operator between operands",
    labels = ["this operand", "and this operand"],
    help = format!("add an operator such as {} between them", "`*`".fg(EXPR)),
)]
pub struct MissingOperator;

/// The operator catalog was asked about a function that no operator turns into.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Generic,
    message = format!("unknown operator function `{}`", function),
)]
pub struct UnknownOperator {
    /// The function name that was looked up.
    pub function: String,
}
