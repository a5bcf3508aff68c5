//! Trigonometric, hyperbolic and related functions.
//!
//! Functions that take an angle read it in the evaluator's [`TrigMode`], and inverse functions
//! return an angle in that mode. Hyperbolic functions are not affected by the mode.
//!
//! [`TrigMode`]: crate::numerical::trig_mode::TrigMode

use mathex_error::Error;
use rug::Float;
use crate::consts;
use crate::numerical::func::{Arity, CallCtxt, Function};
use super::helper::recip;

pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("cot", "cotan"),
    ("acot", "acotan"),
    ("coth", "cotanh"),
    ("acoth", "acotanh"),
    ("vers", "versin"),
    ("ver", "versin"),
    ("vercos", "vercosin"),
    ("cvs", "coversin"),
    ("chord", "crd"),
];

/// Builds functions that take an angle in the evaluator's angle mode.
macro_rules! build_radian_input {
    ($($name:literal => $func:expr),* $(,)?) => {
        vec![
            $(
                Function::new($name, Arity::Exact(1), |args, ctxt| {
                    let angle = ctxt.trig_mode().to_radians(args[0].clone());
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(angle, ctxt)
                }),
            )*
        ]
    };
}

/// Builds functions that return an angle in the evaluator's angle mode.
macro_rules! build_radian_output {
    ($($name:literal => $func:expr),* $(,)?) => {
        vec![
            $(
                Function::new($name, Arity::Exact(1), |args, ctxt| {
                    #[allow(clippy::redundant_closure_call)]
                    let angle: Float = ($func)(args[0].clone(), ctxt)?;
                    Ok(ctxt.trig_mode().from_radians(angle))
                }),
            )*
        ]
    };
}

/// Builds functions that are not affected by the angle mode.
macro_rules! build_hyperbolic {
    ($($name:literal => $func:expr),* $(,)?) => {
        vec![
            $(
                Function::new($name, Arity::Exact(1), |args, ctxt| {
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(args[0].clone(), ctxt)
                }),
            )*
        ]
    };
}

type Output = Result<Float, Error>;

pub(crate) fn functions() -> Vec<Function> {
    let mut functions = build_radian_input! {
        "sin" => |x: Float, _: &CallCtxt| -> Output { Ok(x.sin()) },
        "cos" => |x: Float, _: &CallCtxt| -> Output { Ok(x.cos()) },
        "tan" => |x: Float, _: &CallCtxt| -> Output { Ok(x.tan()) },
        "csc" => |x: Float, ctxt: &CallCtxt| -> Output { recip(ctxt, x.sin()) },
        "sec" => |x: Float, ctxt: &CallCtxt| -> Output { recip(ctxt, x.cos()) },
        "cotan" => |x: Float, ctxt: &CallCtxt| -> Output { recip(ctxt, x.tan()) },
        "versin" => |x: Float, _: &CallCtxt| -> Output { Ok(1u32 - x.cos()) },
        "vercosin" => |x: Float, _: &CallCtxt| -> Output { Ok(1u32 + x.cos()) },
        "coversin" => |x: Float, _: &CallCtxt| -> Output { Ok(1u32 - x.sin()) },
        "covercosin" => |x: Float, _: &CallCtxt| -> Output { Ok(1u32 + x.sin()) },
        "haversin" => |x: Float, _: &CallCtxt| -> Output { Ok((1u32 - x.cos()) / 2u32) },
        "havercosin" => |x: Float, _: &CallCtxt| -> Output { Ok((1u32 + x.cos()) / 2u32) },
        "hacoversin" => |x: Float, _: &CallCtxt| -> Output { Ok((1u32 - x.sin()) / 2u32) },
        "hacovercosin" => |x: Float, _: &CallCtxt| -> Output { Ok((1u32 + x.sin()) / 2u32) },
        "exsec" => |x: Float, ctxt: &CallCtxt| -> Output { Ok(recip(ctxt, x.cos())? - 1u32) },
        "excsc" => |x: Float, ctxt: &CallCtxt| -> Output { Ok(recip(ctxt, x.sin())? - 1u32) },
        "crd" => |x: Float, _: &CallCtxt| -> Output { Ok((x / 2u32).sin() * 2u32) },
    };

    functions.extend(build_radian_output! {
        "asin" => |x: Float, _: &CallCtxt| -> Output { Ok(x.asin()) },
        "acos" => |x: Float, _: &CallCtxt| -> Output { Ok(x.acos()) },
        "atan" => |x: Float, _: &CallCtxt| -> Output { Ok(x.atan()) },
        "acsc" => |x: Float, ctxt: &CallCtxt| -> Output { Ok(recip(ctxt, x)?.asin()) },
        "asec" => |x: Float, ctxt: &CallCtxt| -> Output { Ok(recip(ctxt, x)?.acos()) },
        "acotan" => |x: Float, ctxt: &CallCtxt| -> Output {
            if x.is_zero() {
                return Ok(consts::pi(ctxt.precision()) / 2u32);
            }
            Ok(x.recip().atan())
        },
    });

    functions.extend(build_hyperbolic! {
        "sinh" => |x: Float, _: &CallCtxt| -> Output { Ok(x.sinh()) },
        "cosh" => |x: Float, _: &CallCtxt| -> Output { Ok(x.cosh()) },
        "tanh" => |x: Float, _: &CallCtxt| -> Output { Ok(x.tanh()) },
        "csch" => |x: Float, ctxt: &CallCtxt| -> Output { recip(ctxt, x.sinh()) },
        "sech" => |x: Float, _: &CallCtxt| -> Output { Ok(x.sech()) },
        "cotanh" => |x: Float, ctxt: &CallCtxt| -> Output { recip(ctxt, x.tanh()) },
        "asinh" => |x: Float, _: &CallCtxt| -> Output { Ok(x.asinh()) },
        "acosh" => |x: Float, _: &CallCtxt| -> Output { Ok(x.acosh()) },
        "atanh" => |x: Float, _: &CallCtxt| -> Output { Ok(x.atanh()) },
        "acsch" => |x: Float, ctxt: &CallCtxt| -> Output { Ok(recip(ctxt, x)?.asinh()) },
        "asech" => |x: Float, ctxt: &CallCtxt| -> Output { Ok(recip(ctxt, x)?.acosh()) },
        "acotanh" => |x: Float, ctxt: &CallCtxt| -> Output { Ok(recip(ctxt, x)?.atanh()) },
        "dtor" => |x: Float, _: &CallCtxt| -> Output {
            let pi = consts::pi(x.prec());
            Ok(x * pi / 180u32)
        },
        "rtod" => |x: Float, _: &CallCtxt| -> Output {
            let pi = consts::pi(x.prec());
            Ok(x * 180u32 / pi)
        },
    });

    functions.push(Function::new("atan2", Arity::Exact(2), |args, ctxt| {
        let angle = args[0].clone().atan2(&args[1]);
        Ok(ctxt.trig_mode().from_radians(angle))
    }));

    functions
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::numerical::{
        config::EvalConfig,
        error::kind,
        eval::{evaluate, Evaluator, Substitutions},
        trig_mode::TrigMode,
    };
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn eval(source: &str) -> f64 {
        evaluate(source).unwrap().to_f64()
    }

    #[test]
    fn radians() {
        assert_float_absolute_eq!(eval("sin(pi / 2)"), 1.0);
        assert_float_absolute_eq!(eval("cos(pi)"), -1.0);
        assert_float_absolute_eq!(eval("tan(pi / 4)"), 1.0);
        assert_float_absolute_eq!(eval("sec(0)"), 1.0);
        assert_float_absolute_eq!(eval("cot(pi / 4)"), 1.0);
        assert_float_absolute_eq!(eval("asin(1)"), FRAC_PI_2);
        assert_float_absolute_eq!(eval("acot(1)"), FRAC_PI_4);
        assert_float_absolute_eq!(eval("acot(0)"), FRAC_PI_2);
        assert_float_absolute_eq!(eval("atan2(1, 1)"), FRAC_PI_4);
    }

    #[test]
    fn reciprocal_of_zero() {
        assert!(evaluate("csc(0)").unwrap_err().is::<kind::DivisionByZero>());
        assert!(evaluate("acsc(0)").unwrap_err().is::<kind::DivisionByZero>());
        assert!(evaluate("coth(0)").unwrap_err().is::<kind::DivisionByZero>());
    }

    #[test]
    fn inverse_out_of_domain() {
        assert!(evaluate("asin(2)").unwrap_err().is::<kind::OutOfDomain>());
        assert!(evaluate("acosh(0)").unwrap_err().is::<kind::OutOfDomain>());
    }

    #[test]
    fn degrees() {
        let evaluator = Evaluator::new(EvalConfig {
            trig_mode: TrigMode::Degrees,
            ..EvalConfig::default()
        });
        let eval = |source| evaluator.evaluate_str(source, &Substitutions::new()).unwrap().to_f64();
        assert_float_absolute_eq!(eval("sin(90)"), 1.0);
        assert_float_absolute_eq!(eval("cos(180)"), -1.0);
        assert_float_absolute_eq!(eval("asin(1)"), 90.0);
        assert_float_absolute_eq!(eval("atan2(1, 1)"), 45.0);
        assert_float_absolute_eq!(eval("dtor(180)"), PI);
    }

    #[test]
    fn hyperbolic() {
        assert_float_absolute_eq!(eval("sinh(0)"), 0.0);
        assert_float_absolute_eq!(eval("cosh(0)"), 1.0);
        assert_float_absolute_eq!(eval("sech(0)"), 1.0);
        assert_float_absolute_eq!(eval("tanh(1)"), 1f64.tanh());
        assert_float_absolute_eq!(eval("acoth(2)"), 0.5f64.atanh());
    }

    #[test]
    fn versines() {
        assert_float_absolute_eq!(eval("versin(pi)"), 2.0);
        assert_float_absolute_eq!(eval("vercos(pi)"), 0.0);
        assert_float_absolute_eq!(eval("coversin(pi / 2)"), 0.0);
        assert_float_absolute_eq!(eval("covercosin(pi / 2)"), 2.0);
        assert_float_absolute_eq!(eval("haversin(pi)"), 1.0);
        assert_float_absolute_eq!(eval("havercosin(0)"), 1.0);
        assert_float_absolute_eq!(eval("hacoversin(0)"), 0.5);
        assert_float_absolute_eq!(eval("hacovercosin(0)"), 0.5);
        assert_float_absolute_eq!(eval("exsec(0)"), 0.0);
        assert_float_absolute_eq!(eval("excsc(pi / 2)"), 0.0);
        assert_float_absolute_eq!(eval("chord(pi)"), 2.0);
    }

    #[test]
    fn angle_conversion() {
        assert_float_absolute_eq!(eval("dtor(180)"), PI);
        assert_float_absolute_eq!(eval("rtod(pi)"), 180.0);
        assert_float_absolute_eq!(eval("90°"), FRAC_PI_2);
        assert_float_absolute_eq!(eval("sin(90°)"), 1.0);
    }
}
