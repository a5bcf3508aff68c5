use crate::{
    catalog::{op::{Associativity, Operator, Position}, OperatorCatalog, DEFAULT_CATALOG},
    tokenizer::glyph,
};
use rug::{Float, Integer};
use std::fmt::{Display, Formatter, Result};
use super::ast::{Expr, PRECISION};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Which operand of a binary operator a child expression is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Returns the operator that the function node `name(args)` can be written with.
fn operator_for<'c>(catalog: &'c OperatorCatalog, name: &str, args: &[Expr]) -> Option<&'c Operator> {
    catalog.lookup_function_with_args(name, args.len())
        .filter(|op| op.primary_token().is_some())
}

/// Returns the precedence band of the operator that `expr` is written with, or [`None`] if it is
/// written as an atom. Negative numbers are written with a leading minus sign, so they count as a
/// negation.
fn written_precedence(catalog: &OperatorCatalog, expr: &Expr) -> Option<u32> {
    match expr {
        Expr::Number(value) if value.is_sign_negative() && !value.is_zero() => {
            catalog.lookup_function_with_args("negate", 1).map(Operator::precedence)
        },
        Expr::Function { name, args } => operator_for(catalog, name, args).map(Operator::precedence),
        _ => None,
    }
}

/// Returns true if `child` must be parenthesized to be read back as an operand of `parent`.
fn needs_parens(catalog: &OperatorCatalog, parent: &Operator, child: &Expr, side: Side) -> bool {
    let Some(child) = written_precedence(catalog, child) else {
        return false;
    };
    let parent_precedence = parent.precedence();

    if child != parent_precedence {
        return child < parent_precedence;
    }

    match parent.position() {
        Position::Infix => match (parent.associativity, side) {
            (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left) => true,
            _ => false,
        },
        Position::Prefix | Position::Postfix => false,
    }
}

/// Writes a number so that the lexer reads back exactly the same value.
///
/// Short decimal forms are tried first. If none of them reads back to the same value, which
/// happens for results computed at a lower precision such as `0.1 + 0.2`, the shorter of the
/// exact decimal expansion and the digits [`rug`] needs at the value's precision is written.
fn fmt_number(f: &mut Formatter, value: &Float) -> Result {
    if value.is_zero() {
        return write!(f, "0");
    }
    if !value.is_finite() {
        return write!(f, "{}", value.to_f64());
    }

    let float = value.to_f64();
    let plain = format!("{}", float);
    let scientific = format!("{:e}", float);
    let candidates = if plain.len() <= 21 {
        [plain, scientific]
    } else {
        [scientific, plain]
    };
    if let Some(written) = candidates.into_iter().find(|written| reads_back(written, value)) {
        return write!(f, "{}", written);
    }

    let digits = value.to_string_radix(10, None);
    match exact_decimal(value) {
        Some(exact) if exact.len() <= digits.len() || !reads_back(&digits, value) => {
            write!(f, "{}", exact)
        },
        _ => write!(f, "{}", digits),
    }
}

/// Returns true if the lexer reads `written` as exactly `value`.
fn reads_back(written: &str, value: &Float) -> bool {
    Float::parse(written)
        .map_or(false, |parsed| Float::with_val(PRECISION, parsed) == *value)
}

/// Returns every decimal digit of a finite binary value. A value `m * 2^-k` has exactly `k`
/// digits after the point, since it equals `m * 5^k / 10^k`.
fn exact_decimal(value: &Float) -> Option<String> {
    let (mantissa, exp) = value.to_integer_exp()?;
    if exp >= 0 {
        return Some((mantissa << exp.unsigned_abs()).to_string());
    }

    let places = exp.unsigned_abs();
    let sign = if mantissa < 0 { "-" } else { "" };
    let scaled = mantissa.abs() * Integer::from(Integer::u_pow_u(5, places));
    let digits = format!("{:0>width$}", scaled.to_string(), width = places as usize + 1);
    let (whole, fraction) = digits.split_at(digits.len() - places as usize);
    let fraction = fraction.trim_end_matches('0');
    Some(if fraction.is_empty() {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, fraction)
    })
}

/// Writes a variable name, quoting it if the lexer would not read it back as one name.
fn fmt_variable(f: &mut Formatter, name: &str) -> Result {
    let word = name.chars().all(|c| (c == '_' || c.is_alphanumeric()) && !glyph::is_numeric_glyph(c))
        && !name.starts_with(|c: char| c.is_ascii_digit());
    let symbol = name.chars()
        .all(|c| !c.is_ascii() && !c.is_alphanumeric() && !c.is_whitespace() && !glyph::is_numeric_glyph(c));
    if !name.is_empty() && (word || symbol) {
        return write!(f, "{}", name);
    }

    write!(f, "\"")?;
    for c in name.chars() {
        if matches!(c, '"' | '\\') {
            write!(f, "\\")?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, "\"")
}

/// An [`Expr`] paired with the catalog used to print its operators.
pub struct ExprDisplay<'e, 'c> {
    expr: &'e Expr,
    catalog: &'c OperatorCatalog,
}

impl Expr {
    /// Returns a value that prints the expression using the operator spellings of `catalog`.
    ///
    /// The [`Display`] implementation of [`Expr`] uses [`DEFAULT_CATALOG`].
    pub fn display_with<'e, 'c>(&'e self, catalog: &'c OperatorCatalog) -> ExprDisplay<'e, 'c> {
        ExprDisplay { expr: self, catalog }
    }
}

impl Display for ExprDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let catalog = self.catalog;
        let (name, args) = match self.expr {
            Expr::Number(value) => return fmt_number(f, value),
            Expr::Variable(name) => return fmt_variable(f, name),
            Expr::Function { name, args } => (name, args),
        };

        let operand = |f: &mut Formatter, op: &Operator, child: &Expr, side: Side| {
            if needs_parens(catalog, op, child, side) {
                write!(f, "({})", child.display_with(catalog))
            } else {
                write!(f, "{}", child.display_with(catalog))
            }
        };

        match operator_for(catalog, name, args) {
            Some(op) => {
                let token = op.primary_token().unwrap_or_default();
                let wordy = token.chars().any(char::is_alphanumeric);
                match (op.position(), args.as_slice()) {
                    (Position::Infix, [lhs, rhs]) => {
                        operand(f, op, lhs, Side::Left)?;
                        write!(f, " {} ", token)?;
                        operand(f, op, rhs, Side::Right)
                    },
                    (Position::Prefix, [arg]) => {
                        write!(f, "{}", token)?;
                        if wordy {
                            write!(f, " ")?;
                        }
                        operand(f, op, arg, Side::Right)
                    },
                    (Position::Postfix, [arg]) => {
                        operand(f, op, arg, Side::Left)?;
                        if wordy {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", token)
                    },
                    _ => fmt_call(f, name, args, catalog),
                }
            },
            None => fmt_call(f, name, args, catalog),
        }
    }
}

fn fmt_call(f: &mut Formatter, name: &str, args: &[Expr], catalog: &OperatorCatalog) -> Result {
    write!(f, "{}(", name)?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg.display_with(catalog))?;
    }
    write!(f, ")")
}

/// Prints the expression so that parsing the output with the default catalog and configuration
/// gives back an equal expression. Numbers are written exactly, and variable names that are not
/// plain identifiers are quoted.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.display_with(&DEFAULT_CATALOG).fmt(f)
    }
}

/// Writes `child` as an operand of `parent`, wrapped in `\left( \right)` if needed.
fn fmt_latex_operand(f: &mut Formatter, parent: &Operator, child: &Expr, side: Side) -> Result {
    if needs_parens(&DEFAULT_CATALOG, parent, child, side) {
        write!(f, "\\left(")?;
        child.fmt_latex(f)?;
        write!(f, "\\right)")
    } else {
        child.fmt_latex(f)
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        let (name, args) = match self {
            Expr::Number(value) => return fmt_number(f, value),
            Expr::Variable(name) => return write!(f, "{}", name),
            Expr::Function { name, args } => (name.as_str(), args.as_slice()),
        };

        match (name, args) {
            ("divide", [lhs, rhs]) => {
                write!(f, "\\frac{{")?;
                lhs.fmt_latex(f)?;
                write!(f, "}}{{")?;
                rhs.fmt_latex(f)?;
                return write!(f, "}}");
            },
            ("pow", [lhs, rhs]) => {
                // these are already delimited in LaTeX
                let delimited = ["sqrt", "cuberoot", "abs"].iter().any(|name| lhs.is_call_to(name));
                match operator_for(&DEFAULT_CATALOG, name, args) {
                    Some(op) if !delimited => fmt_latex_operand(f, op, lhs, Side::Left)?,
                    _ => lhs.fmt_latex(f)?,
                }
                write!(f, "^{{")?;
                rhs.fmt_latex(f)?;
                return write!(f, "}}");
            },
            ("sqrt", [arg]) => {
                write!(f, "\\sqrt{{")?;
                arg.fmt_latex(f)?;
                return write!(f, "}}");
            },
            ("cuberoot", [arg]) => {
                write!(f, "\\sqrt[3]{{")?;
                arg.fmt_latex(f)?;
                return write!(f, "}}");
            },
            ("abs", [arg]) => {
                write!(f, "\\left|")?;
                arg.fmt_latex(f)?;
                return write!(f, "\\right|");
            },
            _ => (),
        }

        let Some(op) = operator_for(&DEFAULT_CATALOG, name, args) else {
            write!(f, "\\mathrm{{ {} }} \\left(", name)?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                arg.fmt_latex(f)?;
            }
            return write!(f, "\\right)");
        };

        let token = match name {
            "multiply" => "\\cdot",
            _ => op.primary_token().unwrap_or_default(),
        };
        match args {
            [lhs, rhs] => {
                fmt_latex_operand(f, op, lhs, Side::Left)?;
                write!(f, " {} ", token)?;
                fmt_latex_operand(f, op, rhs, Side::Right)
            },
            [arg] if op.position() == Position::Prefix => {
                write!(f, "{}", token)?;
                fmt_latex_operand(f, op, arg, Side::Right)
            },
            [arg] => {
                fmt_latex_operand(f, op, arg, Side::Left)?;
                write!(f, "{}", token)
            },
            _ => Ok(()),
        }
    }
}
