//! Rounding functions.

use crate::numerical::func::{Arity, Function};

/// Builds functions that take a single argument and round it.
macro_rules! build {
    ($($name:literal => $method:ident),* $(,)?) => {
        vec![
            $(
                Function::new($name, Arity::Exact(1), |args, _| Ok(args[0].clone().$method())),
            )*
        ]
    };
}

pub(crate) fn functions() -> Vec<Function> {
    build! {
        "ceil" => ceil,
        "floor" => floor,
        "trunc" => trunc,
        "round" => round,
    }
}

#[cfg(test)]
mod tests {
    use crate::numerical::eval::evaluate;

    fn eval(source: &str) -> f64 {
        evaluate(source).unwrap().to_f64()
    }

    #[test]
    fn rounding() {
        assert_eq!(eval("ceil(1.2)"), 2.0);
        assert_eq!(eval("ceil(-1.2)"), -1.0);
        assert_eq!(eval("floor(1.8)"), 1.0);
        assert_eq!(eval("floor(-1.2)"), -2.0);
        assert_eq!(eval("trunc(-1.8)"), -1.0);
        assert_eq!(eval("round(2.5)"), 3.0);
        assert_eq!(eval("round(-2.5)"), -3.0);
        assert_eq!(eval("round(2.4)"), 2.0);
    }
}
