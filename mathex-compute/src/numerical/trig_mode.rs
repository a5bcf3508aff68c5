use rug::Float;

#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The angle unit used by trigonometric functions. This affects the input of the trigonometric
/// functions, and the output of their inverses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum TrigMode {
    /// Use radians.
    #[default]
    Radians,

    /// Use degrees.
    Degrees,
}

impl TrigMode {
    /// Converts an angle in this unit to radians.
    pub fn to_radians(self, angle: Float) -> Float {
        match self {
            TrigMode::Radians => angle,
            TrigMode::Degrees => {
                let pi = crate::consts::pi(angle.prec());
                angle * pi / 180u32
            },
        }
    }

    /// Converts an angle in radians to this unit.
    pub fn from_radians(self, angle: Float) -> Float {
        match self {
            TrigMode::Radians => angle,
            TrigMode::Degrees => {
                let pi = crate::consts::pi(angle.prec());
                angle * 180u32 / pi
            },
        }
    }
}

impl std::fmt::Display for TrigMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrigMode::Radians => write!(f, "radians"),
            TrigMode::Degrees => write!(f, "degrees"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn conversions() {
        let half_turn = TrigMode::Degrees.to_radians(Float::with_val(53, 180));
        assert_float_absolute_eq!(half_turn.to_f64(), std::f64::consts::PI);

        let right_angle = TrigMode::Degrees.from_radians(Float::with_val(53, std::f64::consts::FRAC_PI_2));
        assert_float_absolute_eq!(right_angle.to_f64(), 90.0);

        assert_eq!(TrigMode::Radians.to_radians(Float::with_val(53, 2)), 2);
    }
}
