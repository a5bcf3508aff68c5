use super::trig_mode::TrigMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The numeric backend used during evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericMode {
    /// Binary floating point with a 53-bit significand, the precision of an IEEE 754 double.
    #[default]
    Float,

    /// Arbitrary-precision floating point with the given number of significand bits.
    Decimal {
        precision: u32,
    },
}

impl NumericMode {
    /// The number of significand bits used by this mode.
    pub fn precision(self) -> u32 {
        match self {
            NumericMode::Float => 53,
            NumericMode::Decimal { precision } => precision.clamp(rug::float::prec_min(), rug::float::prec_max()),
        }
    }
}

/// Options that control how an [`Evaluator`](super::eval::Evaluator) computes values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalConfig {
    /// The numeric backend.
    pub mode: NumericMode,

    /// The angle unit of trigonometric functions.
    pub trig_mode: TrigMode,

    /// If true, an unknown variable may be resolved as a call to a function with no arguments
    /// (`pi` is `pi()`), and an unknown function called with no arguments may be resolved as a
    /// variable.
    pub argumentless_functions: bool,

    /// The maximum number of rewrite passes before rewriting is considered non-terminating.
    pub max_rewrite_iterations: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            mode: NumericMode::default(),
            trig_mode: TrigMode::default(),
            argumentless_functions: true,
            max_rewrite_iterations: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision() {
        assert_eq!(NumericMode::Float.precision(), 53);
        assert_eq!(NumericMode::Decimal { precision: 200 }.precision(), 200);
        assert_eq!(NumericMode::Decimal { precision: 0 }.precision(), rug::float::prec_min());
    }
}
