//! Bitwise operations on integers, using two's complement for negative numbers.

use mathex_error::Error;
use rug::{Float, Integer};
use crate::numerical::func::{Arity, CallCtxt, Function};
use super::helper::{integer, out_of_domain};

/// Builds a function that applies a binary operation to two integer arguments.
macro_rules! build_binary {
    ($($name:literal => $op:expr),* $(,)?) => {
        vec![
            $(
                Function::new($name, Arity::Exact(2), |args, ctxt| {
                    let lhs = integer(ctxt, &args[0])?;
                    let rhs = integer(ctxt, &args[1])?;
                    #[allow(clippy::redundant_closure_call)]
                    let result: Integer = ($op)(lhs, rhs);
                    Ok(Float::with_val(ctxt.precision(), result))
                }),
            )*
        ]
    };
}

/// The largest number of bits a value can be shifted left by.
const MAX_LEFT_SHIFT: u32 = 1 << 16;

/// Returns the shift amount, which must be a non-negative integer. Amounts too large for a `u32`
/// saturate.
fn shift_amount(ctxt: &CallCtxt<'_>, value: &Float) -> Result<u32, Error> {
    let amount = integer(ctxt, value)?;
    if amount < 0 {
        return Err(out_of_domain(ctxt, "negative shift amounts"));
    }
    Ok(amount.to_u32().unwrap_or(u32::MAX))
}

pub(crate) fn functions() -> Vec<Function> {
    let mut functions = build_binary! {
        "and" => |lhs: Integer, rhs: Integer| lhs & rhs,
        "or" => |lhs: Integer, rhs: Integer| lhs | rhs,
        "xor" => |lhs: Integer, rhs: Integer| lhs ^ rhs,
    };
    functions.extend([
        Function::new("not", Arity::Exact(1), |args, ctxt| {
            let value = integer(ctxt, &args[0])?;
            Ok(Float::with_val(ctxt.precision(), !value))
        }),
        Function::new("lshift", Arity::Exact(2), |args, ctxt| {
            let value = integer(ctxt, &args[0])?;
            let amount = shift_amount(ctxt, &args[1])?;
            if amount > MAX_LEFT_SHIFT {
                return Err(out_of_domain(ctxt, "shifts left by more than 65536 bits"));
            }
            Ok(Float::with_val(ctxt.precision(), value << amount))
        }),
        Function::new("rshift", Arity::Exact(2), |args, ctxt| {
            let value = integer(ctxt, &args[0])?;
            let amount = shift_amount(ctxt, &args[1])?;
            Ok(Float::with_val(ctxt.precision(), value >> amount))
        }),
    ]);
    functions
}

#[cfg(test)]
mod tests {
    use crate::numerical::{error::kind, eval::evaluate};

    fn eval(source: &str) -> f64 {
        evaluate(source).unwrap().to_f64()
    }

    #[test]
    fn operators() {
        assert_eq!(eval("12 & 10"), 8.0);
        assert_eq!(eval("12 | 10"), 14.0);
        assert_eq!(eval("12 ⊻ 10"), 6.0);
        assert_eq!(eval("~5"), -6.0);
        assert_eq!(eval("1 << 4"), 16.0);
        assert_eq!(eval("-16 >> 2"), -4.0);
    }

    #[test]
    fn precedence() {
        // shifts bind tighter than `&`, which binds tighter than `|`
        assert_eq!(eval("1 | 2 & 3 << 1"), 3.0);
        assert_eq!(eval("1 + 1 << 2"), 8.0);
    }

    #[test]
    fn non_integers() {
        assert!(evaluate("1.5 | 2").unwrap_err().is::<kind::NonIntegerArgument>());
        assert!(evaluate("1 << -1").unwrap_err().is::<kind::OutOfDomain>());
    }

    #[test]
    fn huge_shifts() {
        assert!(evaluate("1 << 4000000000").unwrap_err().is::<kind::OutOfDomain>());
        assert!(evaluate("1 << 65537").unwrap_err().is::<kind::OutOfDomain>());
        assert_eq!(eval("1 >> 4000000000"), 0.0);
        assert_eq!(eval("-1 >> 1e20"), -1.0);
        assert_eq!(eval("(1 << 65536) >> 65536"), 1.0);
    }
}
