//! Logical operators and comparisons. Every function returns `1` for true and `0` for false, and
//! any non-zero value is considered true.

use rug::Float;
use crate::numerical::func::{Arity, Function};
use crate::primitive::{float_from_bool, is_truthy};

pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("if", "l_if"),
];

/// Builds comparison functions of two arguments.
macro_rules! build_comparison {
    ($($name:literal => $op:expr),* $(,)?) => {
        vec![
            $(
                Function::new($name, Arity::Exact(2), |args, ctxt| {
                    #[allow(clippy::redundant_closure_call)]
                    let result: bool = ($op)(&args[0], &args[1]);
                    Ok(float_from_bool(ctxt.precision(), result))
                }),
            )*
        ]
    };
}

pub(crate) fn functions() -> Vec<Function> {
    let mut functions = build_comparison! {
        "l_eq" => |a: &Float, b: &Float| a == b,
        "l_neq" => |a: &Float, b: &Float| a != b,
        "l_lt" => |a: &Float, b: &Float| a < b,
        "l_gt" => |a: &Float, b: &Float| a > b,
        "l_ltoe" => |a: &Float, b: &Float| a <= b,
        "l_gtoe" => |a: &Float, b: &Float| a >= b,
    };

    functions.extend([
        Function::lazy("l_and", Arity::Exact(2), |args, ctxt| {
            let result = is_truthy(&ctxt.eval(&args[0])?) && is_truthy(&ctxt.eval(&args[1])?);
            Ok(float_from_bool(ctxt.precision(), result))
        }),
        Function::lazy("l_or", Arity::Exact(2), |args, ctxt| {
            let result = is_truthy(&ctxt.eval(&args[0])?) || is_truthy(&ctxt.eval(&args[1])?);
            Ok(float_from_bool(ctxt.precision(), result))
        }),
        Function::new("l_not", Arity::Exact(1), |args, ctxt| {
            Ok(float_from_bool(ctxt.precision(), !is_truthy(&args[0])))
        }),
        Function::lazy("l_if", Arity::Exact(3), |args, ctxt| {
            if is_truthy(&ctxt.eval(&args[0])?) {
                ctxt.eval(&args[1])
            } else {
                ctxt.eval(&args[2])
            }
        }),
    ]);
    functions
}
