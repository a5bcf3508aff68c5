//! Powers, roots, exponentials and logarithms.

use mathex_error::Error;
use rug::{ops::Pow, Float};
use crate::numerical::func::{Arity, CallCtxt, Function};
use super::helper::{division_by_zero, integer, out_of_domain};

pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("cbrt", "cuberoot"),
];

/// Fails if the argument of a logarithm is not positive.
fn positive<'f>(ctxt: &CallCtxt<'_>, value: &'f Float) -> Result<&'f Float, Error> {
    if *value > 0 {
        Ok(value)
    } else {
        Err(out_of_domain(ctxt, "numbers that are zero or negative"))
    }
}

pub(crate) fn functions() -> Vec<Function> {
    vec![
        Function::new("pow", Arity::Exact(2), |args, ctxt| {
            if args[0].is_zero() && args[1] < 0 {
                return Err(division_by_zero(ctxt));
            }
            Ok(args[0].clone().pow(&args[1]))
        }),
        Function::new("sqrt", Arity::Exact(1), |args, ctxt| {
            if args[0] < 0 {
                return Err(out_of_domain(ctxt, "negative numbers"));
            }
            Ok(args[0].clone().sqrt())
        }),
        Function::new("cuberoot", Arity::Exact(1), |args, _| Ok(args[0].clone().cbrt())),
        Function::new("nthroot", Arity::Exact(2), |args, ctxt| nthroot(&args[0], &args[1], ctxt)),
        Function::new("exp", Arity::Exact(1), |args, _| Ok(args[0].clone().exp())),
        Function::new("ln", Arity::Exact(1), |args, ctxt| Ok(positive(ctxt, &args[0])?.clone().ln())),
        Function::new("log", Arity::Exact(1), |args, ctxt| Ok(positive(ctxt, &args[0])?.clone().log10())),
        Function::new("log2", Arity::Exact(1), |args, ctxt| Ok(positive(ctxt, &args[0])?.clone().log2())),
        Function::new("abs", Arity::Exact(1), |args, _| Ok(args[0].clone().abs())),
    ]
}

/// Returns the `n`th root of `x`. A negative `x` has a real root only if `n` is an odd integer,
/// in which case the root is negative.
pub fn nthroot(x: &Float, n: &Float, ctxt: &CallCtxt<'_>) -> Result<Float, Error> {
    if n.is_zero() {
        return Err(division_by_zero(ctxt));
    }

    let exponent = n.clone().recip();
    if *x >= 0 {
        return Ok(x.clone().pow(&exponent));
    }

    let degree = integer(ctxt, n)?;
    if degree.is_even() {
        return Err(out_of_domain(ctxt, "even roots of negative numbers"));
    }
    Ok(-(-x.clone()).pow(&exponent))
}
