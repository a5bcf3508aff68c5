//! Miscellaneous functions.

use rand::Rng;
use crate::numerical::func::{Arity, Function};
use crate::primitive::float_from_bool;
use super::helper::out_of_domain;

pub(crate) fn functions() -> Vec<Function> {
    vec![
        // compares the argument expressions themselves, so `same(x, x)` is true even when `x` has
        // no value
        Function::lazy("same", Arity::Exact(2), |args, ctxt| {
            Ok(float_from_bool(ctxt.precision(), args[0] == args[1]))
        }),
        Function::new("random", Arity::Between(0, 2), |args, ctxt| {
            let (min, max) = match args {
                [] => (0.0, 1.0),
                [max] => (0.0, max.to_f64()),
                [min, max, ..] => (min.to_f64(), max.to_f64()),
            };
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(out_of_domain(ctxt, "empty or infinite ranges"));
            }
            Ok(ctxt.float(rand::thread_rng().gen_range(min..max)))
        }).impure(),
    ]
}
