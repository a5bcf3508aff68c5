//! Functions to construct [`Float`]s and [`Integer`]s from various types.

use rug::{Assign, Float, Integer};

pub use mathex_parser::PRECISION;

/// Creates a [`Float`] with the given value, at [`PRECISION`] bits.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] with the given value, rounded to `precision` bits.
pub fn float_with<T>(precision: u32, n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(precision, n)
}

/// Creates a [`Float`] that is `1` if `b` is true, `0` otherwise.
pub fn float_from_bool(precision: u32, b: bool) -> Float {
    Float::with_val(precision, u8::from(b))
}

/// Returns the [`Integer`] value of the float, if it is finite and has no fractional part.
pub fn int_from_float(f: &Float) -> Option<Integer> {
    if f.is_integer() {
        f.to_integer()
    } else {
        None
    }
}

/// Returns true if the float is not zero. `NaN` counts as false.
pub fn is_truthy(f: &Float) -> bool {
    !f.is_zero() && !f.is_nan()
}
