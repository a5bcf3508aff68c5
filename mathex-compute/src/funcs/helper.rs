use mathex_error::Error;
use rug::{Float, Integer};
use crate::numerical::{error::kind, func::CallCtxt};
use crate::primitive::int_from_float;

/// Returns a [`kind::DivisionByZero`] error for the function being called.
pub(crate) fn division_by_zero(ctxt: &CallCtxt<'_>) -> Error {
    Error::without_spans(kind::DivisionByZero { name: ctxt.name().to_string() })
}

/// Returns a [`kind::OutOfDomain`] error for the function being called.
pub(crate) fn out_of_domain(ctxt: &CallCtxt<'_>, reason: &str) -> Error {
    Error::without_spans(kind::OutOfDomain {
        name: ctxt.name().to_string(),
        reason: reason.to_string(),
    })
}

/// Returns `value` unchanged, or a division by zero error if it is zero.
pub(crate) fn nonzero<'f>(ctxt: &CallCtxt<'_>, value: &'f Float) -> Result<&'f Float, Error> {
    if value.is_zero() {
        Err(division_by_zero(ctxt))
    } else {
        Ok(value)
    }
}

/// Converts the value to an integer, failing if it has a fractional part.
pub(crate) fn integer(ctxt: &CallCtxt<'_>, value: &Float) -> Result<Integer, Error> {
    int_from_float(value)
        .ok_or_else(|| Error::without_spans(kind::NonIntegerArgument { name: ctxt.name().to_string() }))
}

/// Divides 1 by the value, failing if it is zero.
pub(crate) fn recip(ctxt: &CallCtxt<'_>, value: Float) -> Result<Float, Error> {
    nonzero(ctxt, &value)?;
    Ok(value.recip())
}
