use mathex_error::Error;
use mathex_parser::Expr;
use crate::numerical::eval::Evaluator;
use super::{step::Step, step_collector::StepCollector};

/// Simplifies the expression with a default [`Evaluator`].
///
/// The [default rules](super::rules::DEFAULT_RULES) are applied bottom-up along with constant
/// folding until nothing changes. The result is a fixpoint, so simplifying it again returns it
/// unchanged.
pub fn simplify(expr: &Expr) -> Result<Expr, Error> {
    Evaluator::default().simplify(expr)
}

/// Simplifies the expression with a default [`Evaluator`], recording every rule application in
/// `steps`.
pub fn simplify_with_steps(expr: &Expr, steps: &mut dyn StepCollector<Step>) -> Result<Expr, Error> {
    Evaluator::default().simplify_with_steps(expr, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use crate::numerical::eval::Substitutions;
    use crate::primitive::float;
    use mathex_parser::parse;
    use pretty_assertions::assert_eq;

    fn simplified(source: &str) -> String {
        simplify(&parse(source).unwrap()).unwrap().to_string()
    }

    #[test]
    fn identities() {
        assert_eq!(simplified("0 + x"), "x");
        assert_eq!(simplified("x - x"), "0");
        assert_eq!(simplified("x + x"), "x * 2");
        assert_eq!(simplified("1 * x * 1"), "x");
        assert_eq!(simplified("x * 0 + y"), "y");
        assert_eq!(simplified("x * x"), "x ^ 2");
        assert_eq!(simplified("--x"), "x");
        assert_eq!(simplified("abs(-x)"), "abs(x)");
        assert_eq!(simplified("x ^ 1 + y ^ 0"), "x + 1");
        assert_eq!(simplified("sqrt(x ^ 2)"), "abs(x)");
        assert_eq!(simplified("dtor(rtod(x))"), "x");
        assert_eq!(simplified("exp(x) * exp(y)"), "exp(x + y)");
        assert_eq!(simplified("x^n * y^n"), "(x * y) ^ n");
        assert_eq!(simplified("nthroot(x, 1)"), "x");
    }

    #[test]
    fn constant_folding() {
        assert_eq!(simplified("2 * 3 + 4"), "10");
        assert_eq!(simplified("x + 2 ^ 3"), "x + 8");
        assert_eq!(simplified("nthroot(x ^ 2, 2)"), "abs(x)");
        assert_eq!(simplified("nthroot(x ^ 3, 3)"), "x");
        assert_eq!(simplified("abs(3 - 5)"), "2");
        assert_eq!(simplified("max(1, 3) * y"), "y * 3");
    }

    #[test]
    fn guarded_rules_need_known_values() {
        // `x` could be zero
        assert_eq!(simplified("x / x"), "x / x");
        assert_eq!(simplified("(x * y) / y"), "x * y / y");
    }

    #[test]
    fn idempotent() {
        for source in [
            "x + x + x",
            "2x * 3x",
            "(a + 0) * (b * 1) - (a + 0) * (b * 1)",
            "sqrt((x - 1) ^ 2) / 1",
            "1 / 2 + y * y",
            "exp(a) * exp(b) * exp(c)",
        ] {
            let once = simplify(&parse(source).unwrap()).unwrap();
            let twice = simplify(&once).unwrap();
            assert_eq!(once, twice, "source: {}", source);
        }
    }

    #[test]
    fn preserves_value() {
        let mut subs = Substitutions::new();
        subs.insert("x".to_string(), float(1.5));
        subs.insert("y".to_string(), float(-2));

        let evaluator = Evaluator::default();
        for source in ["x + x * 1 + 0", "x * x - y * 0", "--y + 3 * 4", "exp(x) * exp(y)"] {
            let expr = parse(source).unwrap();
            let expected = evaluator.evaluate(&expr, &subs).unwrap().to_f64();
            let actual = evaluator.evaluate(&simplify(&expr).unwrap(), &subs).unwrap().to_f64();
            assert_float_absolute_eq!(expected, actual);
        }
    }

    #[test]
    fn steps() {
        let mut steps = Vec::new();
        let result = simplify_with_steps(&parse("(x + 0) * 1").unwrap(), &mut steps).unwrap();
        assert_eq!(result, parse("x").unwrap());
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].rule, "__exp1 + 0 => __exp1");
        assert_eq!(steps[0].before, parse("x + 0").unwrap());
        assert_eq!(steps[1].rule, "__exp1 * 1 => __exp1");
        assert_eq!(steps[1].after, parse("x").unwrap());
    }

    #[test]
    fn registered_rules_come_first() {
        let mut evaluator = Evaluator::default();
        evaluator.add_rule_str("__exp1 + 0", None, "zero(__exp1)").unwrap();
        let result = evaluator.simplify(&parse("x + 0").unwrap()).unwrap();
        assert_eq!(result.to_string(), "zero(x)");
    }
}
