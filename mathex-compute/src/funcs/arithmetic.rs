//! Basic arithmetic, factorials and percentages.

use mathex_error::Error;
use mathex_parser::Expr;
use rug::{ops::Pow, Float, Integer};
use crate::numerical::func::{Arity, CallCtxt, Function};
use super::helper::{integer, nonzero, out_of_domain};

pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("implicitmultiply", "multiply"),
    ("modulo", "mod"),
];

/// Largest argument for which the double factorial is computed exactly.
const EXACT_FACTORIAL2_LIMIT: u32 = 10_000;

pub(crate) fn functions() -> Vec<Function> {
    vec![
        Function::lazy("add", Arity::Exact(2), |args, ctxt| {
            percent_aware(args, ctxt, |lhs, rhs| lhs + rhs)
        }),
        Function::lazy("subtract", Arity::Exact(2), |args, ctxt| {
            percent_aware(args, ctxt, |lhs, rhs| lhs - rhs)
        }),
        Function::new("multiply", Arity::Exact(2), |args, _| Ok(args[0].clone() * &args[1])),
        Function::new("divide", Arity::Exact(2), |args, ctxt| {
            let divisor = nonzero(ctxt, &args[1])?;
            Ok(args[0].clone() / divisor)
        }),
        Function::new("mod", Arity::Exact(2), |args, ctxt| {
            let divisor = nonzero(ctxt, &args[1])?;
            Ok(args[0].clone() % divisor)
        }),
        Function::new("negate", Arity::Exact(1), |args, _| Ok(-args[0].clone())),
        Function::new("positive", Arity::Exact(1), |args, _| Ok(args[0].clone())),
        Function::new("factorial", Arity::Exact(1), |args, ctxt| factorial(&args[0], ctxt)),
        Function::new("factorial2", Arity::Exact(1), |args, ctxt| factorial2(&args[0], ctxt)),
        // `x%` depends on where it appears, so it is never folded on its own
        Function::new("percent", Arity::Exact(1), |args, _| Ok(args[0].clone() / 100u32)).impure(),
    ]
}

/// Evaluates `lhs op rhs`. If the right operand is a percentage, such as in `7 + 5%`, it is a
/// percentage of the left operand, so that `7 + 5%` is `7 + 7 * 5 / 100`.
fn percent_aware(
    args: &[Expr],
    ctxt: &CallCtxt<'_>,
    op: impl FnOnce(Float, Float) -> Float,
) -> Result<Float, Error> {
    let lhs = ctxt.eval(&args[0])?;
    let rhs = match args[1].as_function() {
        Some((name, [percentage])) if name.eq_ignore_ascii_case("percent") => {
            let percentage = ctxt.eval(percentage)?;
            lhs.clone() * percentage / 100u32
        },
        _ => ctxt.eval(&args[1])?,
    };
    Ok(op(lhs, rhs))
}

/// Returns the factorial of a non-negative integer.
pub fn factorial(n: &Float, ctxt: &CallCtxt<'_>) -> Result<Float, Error> {
    let n = integer(ctxt, n)?;
    if n < 0 {
        return Err(out_of_domain(ctxt, "negative numbers"));
    }

    Ok(Float::with_val(ctxt.precision(), n + 1u32).gamma())
}

/// Returns the double factorial of a non-negative integer, the product of every integer from `n`
/// down to 1 that has the same parity as `n`.
pub fn factorial2(n: &Float, ctxt: &CallCtxt<'_>) -> Result<Float, Error> {
    let n = integer(ctxt, n)?;
    if n < 0 {
        return Err(out_of_domain(ctxt, "negative numbers"));
    }

    match n.to_u32() {
        Some(n) if n <= EXACT_FACTORIAL2_LIMIT => {
            Ok(Float::with_val(ctxt.precision(), Integer::from(Integer::factorial_2(n))))
        },
        _ => {
            // n!! = 2^(n/2) * (n/2)! for even n, and
            // n!! = 2^((n+1)/2) * (n/2)! / sqrt(pi) for odd n, with (n/2)! = gamma(n/2 + 1)
            let precision = ctxt.precision();
            let half = Float::with_val(precision, &n) / 2u32;
            let gamma = Float::with_val(precision, &half + 1u32).gamma();
            if n.is_even() {
                Ok(Float::with_val(precision, 2u32).pow(&half) * gamma)
            } else {
                let exponent = Float::with_val(precision, &half + 0.5);
                let root_pi = crate::consts::pi(precision).sqrt();
                Ok(Float::with_val(precision, 2u32).pow(&exponent) * gamma / root_pi)
            }
        },
    }
}
