//! Mathematical constants, computed at a requested precision.
//!
//! Each function returns its constant rounded to `precision` bits, so that the same constant can
//! be used by evaluators in [`NumericMode::Float`](crate::NumericMode::Float) and in
//! [`NumericMode::Decimal`](crate::NumericMode::Decimal) with any precision.

use rug::{float::Constant, Float};

/// Archimedes' constant.
pub fn pi(precision: u32) -> Float {
    Float::with_val(precision, Constant::Pi)
}

/// The circle constant, `2π`.
pub fn tau(precision: u32) -> Float {
    pi(precision) * 2u32
}

/// Euler's number.
pub fn e(precision: u32) -> Float {
    Float::with_val(precision, 1).exp()
}

/// The golden ratio.
pub fn phi(precision: u32) -> Float {
    (Float::with_val(precision, 5).sqrt() + 1u32) / 2u32
}

pub fn sqrt2(precision: u32) -> Float {
    Float::with_val(precision, 2).sqrt()
}

/// The natural logarithm of 2.
pub fn ln2(precision: u32) -> Float {
    Float::with_val(precision, Constant::Log2)
}

/// The natural logarithm of 10.
pub fn ln10(precision: u32) -> Float {
    Float::with_val(precision, 10).ln()
}

/// The base-2 logarithm of `e`.
pub fn log2e(precision: u32) -> Float {
    ln2(precision).recip()
}

/// The base-10 logarithm of `e`.
pub fn log10e(precision: u32) -> Float {
    ln10(precision).recip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn double_precision() {
        assert_float_absolute_eq!(pi(53).to_f64(), std::f64::consts::PI);
        assert_float_absolute_eq!(tau(53).to_f64(), std::f64::consts::TAU);
        assert_float_absolute_eq!(e(53).to_f64(), std::f64::consts::E);
        assert_float_absolute_eq!(phi(53).to_f64(), 1.618_033_988_749_895);
        assert_float_absolute_eq!(sqrt2(53).to_f64(), std::f64::consts::SQRT_2);
        assert_float_absolute_eq!(ln2(53).to_f64(), std::f64::consts::LN_2);
        assert_float_absolute_eq!(ln10(53).to_f64(), std::f64::consts::LN_10);
        assert_float_absolute_eq!(log2e(53).to_f64(), std::f64::consts::LOG2_E);
        assert_float_absolute_eq!(log10e(53).to_f64(), std::f64::consts::LOG10_E);
    }

    #[test]
    fn precision_is_respected() {
        assert_eq!(pi(53).prec(), 53);
        assert_eq!(pi(256).prec(), 256);
        assert_ne!(Float::with_val(256, pi(256) - pi(53)), 0);
    }
}
