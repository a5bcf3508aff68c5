//! Functions that take any number of arguments and reduce them to a single value.

use rug::Float;
use std::cmp::Ordering;
use crate::numerical::func::{Arity, CallCtxt, Function};

pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("∑", "sum"),
    ("∏", "product"),
    ("avg", "average"),
    ("mean", "average"),
];

fn sum(args: &[Float], ctxt: &CallCtxt<'_>) -> Float {
    args.iter().fold(ctxt.float(0), |acc, n| acc + n)
}

fn average(args: &[Float], ctxt: &CallCtxt<'_>) -> Float {
    sum(args, ctxt) / args.len() as u32
}

pub(crate) fn functions() -> Vec<Function> {
    vec![
        Function::new("sum", Arity::ANY, |args, ctxt| Ok(sum(args, ctxt))),
        Function::new("product", Arity::ANY, |args, ctxt| {
            Ok(args.iter().fold(ctxt.float(1), |acc, n| acc * n))
        }),
        Function::new("count", Arity::ANY, |args, ctxt| Ok(ctxt.float(args.len()))),
        Function::new("min", Arity::AtLeast(1), |args, _| {
            Ok(args[1..].iter().fold(args[0].clone(), |acc, n| acc.min(n)))
        }),
        Function::new("max", Arity::AtLeast(1), |args, _| {
            Ok(args[1..].iter().fold(args[0].clone(), |acc, n| acc.max(n)))
        }),
        Function::new("average", Arity::AtLeast(1), |args, ctxt| Ok(average(args, ctxt))),
        Function::new("median", Arity::AtLeast(1), |args, ctxt| {
            let mut sorted = args.to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 1 {
                Ok(sorted.swap_remove(mid))
            } else {
                Ok(ctxt.float(&sorted[mid - 1] + &sorted[mid]) / 2u32)
            }
        }),
        Function::new("stddev", Arity::AtLeast(1), |args, ctxt| {
            let mean = average(args, ctxt);
            let squares = args.iter()
                .map(|n| ctxt.float(n - &mean).square())
                .collect::<Vec<_>>();
            Ok(average(&squares, ctxt).sqrt())
        }),
    ]
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::numerical::{error::kind, eval::evaluate};

    fn eval(source: &str) -> f64 {
        evaluate(source).unwrap().to_f64()
    }

    #[test]
    fn sums() {
        assert_eq!(eval("sum(1, 2, 3, 4)"), 10.0);
        assert_eq!(eval("∑(1, 2)"), 3.0);
        assert_eq!(eval("sum()"), 0.0);
        assert_eq!(eval("product(2, 3, 4)"), 24.0);
        assert_eq!(eval("product()"), 1.0);
        assert_eq!(eval("count(5, 5, 5)"), 3.0);
    }

    #[test]
    fn extremes() {
        assert_eq!(eval("max(1, 3, 2)"), 3.0);
        assert_eq!(eval("min(4, -1, 2)"), -1.0);
        assert_eq!(eval("max(7)"), 7.0);
        assert!(evaluate("min()").unwrap_err().is::<kind::InvalidArgumentCount>());
    }

    #[test]
    fn statistics() {
        assert_eq!(eval("average(1, 2, 3, 4)"), 2.5);
        assert_eq!(eval("mean(2, 4)"), 3.0);
        assert_eq!(eval("median(5, 1, 3)"), 3.0);
        assert_eq!(eval("median(4, 1, 3, 2)"), 2.5);
        assert_eq!(eval("stddev(2, 4, 4, 4, 5, 5, 7, 9)"), 2.0);
        assert_float_absolute_eq!(eval("stddev(1, 2)"), 0.5);
    }
}
